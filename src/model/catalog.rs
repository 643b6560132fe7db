//! Static card content: the song list and the footer compliments.

use super::song::{InvalidSongId, Song};

/// Songs in declaration order, before the stack reversal.
const SONGS: &[(&str, &str, &str, &str)] = &[
    (
        "nothing's gonna hurt you baby",
        "nothing's gonna hurt you baby)",
        "cigarettes after sex",
        "https://i.pinimg.com/736x/ef/6e/11/ef6e1129809c85d710d4e533134e9092.jpg",
    ),
    (
        "the blonde-TV girl",
        "the blonde-TV girl",
        "TV girl",
        "https://i.pinimg.com/564x/de/02/9f/de029f7c52606699dadc87950f4ecf0c.jpg",
    ),
    (
        "Baby came home2",
        "Baby came home2",
        "the neighbour hood",
        "https://images.genius.com/858fc19cb2091093364895e43ccb1264.1000x1000x1.jpg",
    ),
    (
        "hona-tha-pyar",
        "hona-tha-pyar",
        "atif aslam",
        "https://i.ytimg.com/vi/dFjEyPoXFuw/maxresdefault.jpg",
    ),
    (
        "TU-hoti-toh",
        "TU-hoti-toh",
        "mohit chauhan",
        "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcTqFbp7KfXStIMQoLMFDkiqLsQUyoEWZNNSXg&s",
    ),
    (
        "gulabo",
        "gulabo",
        "dang bala",
        "https://i.pinimg.com/736x/10/d7/ac/10d7ac5531653720794a71d35bd40a13.jpg",
    ),
];

/// Messages cycled in the footer.
pub const COMPLIMENTS: &[&str] = &[
    "ummm! yeh here it is, hope you like it 🎁 swipe left/right to change ur songs!",
    "✨ ..so happy birthday seerat 🎂 Wishing you a day filled with love, laughter, and all your favorite things. May this year bring you endless joy and wonderful adventures. Enjoy your special day to the fullest! 🌟",
    "idk what else to say, ohh yeah hope ur dream to become a doctor comes true 🩺 ..my best wishes, lesss gooo",
    "you are amazing, even tho i never saw ur face but my intuition tells u got the best smile in the world so keep smiling! ✨",
    "shortyyyy ahhhh 5'4 girl 👧",
    "shine bright, yesh ✨ always remember you're worth a lot so hope to use u in gambling 🂪🂫🂭🂮🂡 ....thts it",
];

/// Credit line revealed under the compliment, one group at a time.
pub const CREDIT_GROUPS: &[&str] = &["Made", "with laziness!!", "by fake", "psychic"];

/// Load the song list in stack order.
///
/// The declared list is reversed so the first declared song lands on the
/// top of the stack (the last index of the deck).
pub fn songs() -> Result<Vec<Song>, InvalidSongId> {
    SONGS
        .iter()
        .rev()
        .map(|(id, title, artist, image)| Song::new(*id, *title, *artist, *image))
        .collect()
}
