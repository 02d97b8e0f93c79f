/// Defines a fieldless enum mirroring a C enumeration, along with
/// conversions to and from the raw `u32` value used across the C boundary.
macro_rules! c_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $cname:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Returns the canonical upper-case name used by the C API.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $cname,)+
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                match value {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::InvalidDiscriminant;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::InvalidDiscriminant::new(stringify!($name), value)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($cname => Ok($name::$variant),)+
                    _ => Err($crate::ParseEnumError {
                        type_name: stringify!($name),
                        input: s.to_owned(),
                    }),
                }
            }
        }
    };
}

