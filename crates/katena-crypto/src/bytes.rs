//! Fixed-width byte newtypes shared by the key and nonce types.
//!
//! Every such value travels as an upper-case hex string and is accepted in
//! either case. `Debug` shows only the first four bytes.

/// Declare a `[u8; N]` newtype with hex/base64 codecs and serde impls.
///
/// `$field` names the value in validation errors.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice, which must be exactly the right length.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, ::katena_core::ValidationError> {
                ::katena_core::encoding::fixed_from_slice($field, bytes).map(Self)
            }

            pub fn from_hex(hex: &str) -> Result<Self, ::katena_core::ValidationError> {
                ::katena_core::encoding::fixed_from_hex($field, hex).map(Self)
            }

            pub fn from_base64(b64: &str) -> Result<Self, ::katena_core::ValidationError> {
                Self::from_slice(&::katena_core::encoding::from_base64($field, b64)?)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Upper-case hex, the wire form.
            pub fn to_hex(&self) -> String {
                ::katena_core::encoding::to_hex_upper(&self.0)
            }

            pub fn to_base64(&self) -> String {
                ::katena_core::encoding::to_base64(&self.0)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let hex = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&hex).map_err(::serde::de::Error::custom)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}...)"),
                    ::katena_core::encoding::to_hex_upper(&self.0[..4])
                )
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }
    };
}

pub(crate) use fixed_bytes;
