//! Registry of the blob codecs used by cached rows.
//!
//! Every type that may be stored as a blob is listed once in the
//! `codec_registry!` invocation below. The macro produces the registry field,
//! its construction, and a [`Registered`] impl that maps the type to its codec,
//! so lookups are resolved at compile time and unlisted types do not compile.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::content::{
    BibleVerses, BlockItem, Credit, Day, Feature, LessonPdf, QuarterlyGroup, Style, UserInput,
};

use super::error::Result;
use super::json::JsonCodec;

/// A type with a codec in the [`CodecRegistry`].
pub trait Registered: Serialize + DeserializeOwned + Sized {
    fn codec(registry: &CodecRegistry) -> &JsonCodec<Self>;
}

macro_rules! codec_registry {
    ($($field:ident: $ty:ty),* $(,)?) => {
        /// Holds one codec per registered blob type.
        ///
        /// Build it once at startup and share it (usually behind an `Arc`)
        /// with every component that reads or writes cached rows.
        #[derive(Clone)]
        pub struct CodecRegistry {
            $($field: JsonCodec<$ty>,)*
        }

        impl CodecRegistry {
            /// Creates the registry with a codec for every registered type.
            pub fn new() -> Self {
                Self {
                    $($field: JsonCodec::new(stringify!($ty)),)*
                }
            }

            /// Names of the registered types, in registration order.
            pub fn type_names(&self) -> Vec<&'static str> {
                vec![$(self.$field.type_name(),)*]
            }
        }

        $(
            impl Registered for $ty {
                fn codec(registry: &CodecRegistry) -> &JsonCodec<Self> {
                    &registry.$field
                }
            }
        )*
    };
}

codec_registry! {
    quarterly_group: QuarterlyGroup,
    features: Vec<Feature>,
    credits: Vec<Credit>,
    days: Vec<Day>,
    pdfs: Vec<LessonPdf>,
    bible_verses: Vec<BibleVerses>,
    strings: Vec<String>,
    blocks: Vec<BlockItem>,
    user_input: UserInput,
    style: Style,
}

impl CodecRegistry {
    /// Returns the codec registered for `T`.
    pub fn codec<T: Registered>(&self) -> &JsonCodec<T> {
        T::codec(self)
    }

    pub fn encode<T: Registered>(&self, value: &T) -> Result<String> {
        self.codec::<T>().encode(value)
    }

    pub fn encode_opt<T: Registered>(&self, value: Option<&T>) -> Result<String> {
        self.codec::<T>().encode_opt(value)
    }

    pub fn try_decode<T: Registered>(&self, raw: &str) -> Result<Option<T>> {
        self.codec::<T>().try_decode(raw)
    }

    pub fn decode<T: Registered>(&self, raw: &str) -> Option<T> {
        self.codec::<T>().decode(raw)
    }

    pub fn decode_opt<T: Registered>(&self, raw: Option<&str>) -> Option<T> {
        self.codec::<T>().decode_opt(raw)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
