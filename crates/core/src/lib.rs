//! Pure core of lessonsync: content models, blob codecs, cache rows and the
//! contracts of the collaborators the repository is built from.

pub mod codec;
pub mod content;
pub mod prefs;
pub mod repository;
pub mod storage;
pub mod sync;
