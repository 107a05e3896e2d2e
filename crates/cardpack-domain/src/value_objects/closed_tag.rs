//! Declarative macro for closed string enumerations.
//!
//! Every generated enum has a `None` variant that absorbs empty or missing
//! input, a canonical kebab-case tag per variant, and serde impls that go
//! through the same lenient parser.

macro_rules! closed_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            /// No tag set.
            #[default]
            None,
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, `None` first.
            pub const ALL: &'static [$name] = &[$name::None, $( $name::$variant ),+];

            /// Returns the canonical tag.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::None => "none",
                    $( Self::$variant => $tag ),+
                }
            }

            /// Returns true for the `None` fallback.
            #[must_use]
            pub const fn is_none(self) -> bool {
                matches!(self, Self::None)
            }

            /// Parses a tag, mapping absent or blank input to `None`.
            pub fn parse_lenient(raw: Option<&str>) -> cardpack_core::CardpackResult<Self> {
                let tag = match raw.map(str::trim) {
                    Some(tag) if !tag.is_empty() => tag,
                    _ => return Ok(Self::None),
                };

                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(tag))
                    .ok_or_else(|| {
                        cardpack_core::CardpackError::validation(format!(
                            "Unknown {} '{}'",
                            stringify!($name),
                            tag
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = cardpack_core::CardpackError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_lenient(Some(s))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Option::<String>::deserialize(deserializer)?;
                Self::parse_lenient(raw.as_deref()).map_err(serde::de::Error::custom)
            }
        }
    };
}
