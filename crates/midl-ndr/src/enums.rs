//! NDR enumerations
//!
//! Classic NDR enums travel as 16-bit values; `[v1_enum]` enums as 32-bit
//! values. [`ndr_enum!`](crate::ndr_enum) declares an enum with named values,
//! its wire width, and a codec that rejects values outside the declared set.

/// Declare an enumeration with its wire representation
///
/// The first variant is the `Default`.
///
/// ```
/// midl_ndr::ndr_enum! {
///     /// Conversation style
///     pub enum Style: u32 {
///         Bidirectional = 0,
///         Unidirectional = 1,
///     }
/// }
///
/// assert_eq!(Style::from_wire(1).unwrap(), Style::Unidirectional);
/// assert!(Style::from_wire(7).is_err());
/// ```
#[macro_export]
macro_rules! ndr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(#[$first_meta:meta])* $first:ident = $first_value:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $value:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $(#[$first_meta])* $first = $first_value,
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl $name {
            /// Convert a wire value, rejecting undeclared values
            pub fn from_wire(value: $repr) -> $crate::Result<Self> {
                match value {
                    $first_value => Ok(Self::$first),
                    $($value => Ok(Self::$variant),)*
                    other => Err($crate::NdrError::InvalidEnumValue(other as u32)),
                }
            }

            pub fn to_wire(self) -> $repr {
                self as $repr
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl $crate::NdrEncode for $name {
            fn ndr_encode(&self, w: &mut $crate::NdrWriter) -> $crate::Result<()> {
                $crate::NdrEncode::ndr_encode(&self.to_wire(), w)
            }
        }

        impl $crate::NdrDecode for $name {
            const NDR_MIN_SIZE: usize = ::std::mem::size_of::<$repr>();

            fn ndr_decode(r: &mut $crate::NdrReader<'_>) -> $crate::Result<Self> {
                let raw = <$repr as $crate::NdrDecode>::ndr_decode(r)?;
                Self::from_wire(raw)
            }
        }
    };
}
