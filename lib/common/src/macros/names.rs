/// Implement [Display](std::fmt::Display) and [FromStr](std::str::FromStr) for a fieldless enum,
/// mapping each variant to a fixed name.
///
/// Parsing is case-insensitive; the error type is `$Err`, constructed from the rejected input
/// with `$Err::from(String)`.
#[macro_export]
macro_rules! named_variants {
    ($Enum:ident, $Err:ty; $($Variant:ident => $name:literal),+ $(,)?) => {
        impl $Enum {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$Enum] = &[$($Enum::$Variant),+];

            /// The fixed name of this variant.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($Enum::$Variant => $name),+
                }
            }
        }

        impl ::std::fmt::Display for $Enum {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $Enum {
            type Err = $Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.trim().eq_ignore_ascii_case($name) {
                        return Ok($Enum::$Variant);
                    }
                )+
                Err(<$Err>::from(s.to_owned()))
            }
        }
    };
}
