//! Node accessor macros
//!
//! These macros eliminate repetitive match code on the `Node` sum type.
//! They use `paste` internally for identifier concatenation.

// =============================================================================
// Enum accessor generation
// =============================================================================

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Each entry is `method_name => VariantName: PayloadType`. Boxed variants
/// are auto-dereferenced by the returned reference.
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     impl_enum_accessors!(element => Element: Element, text => Text: Text);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($method:ident => $variant:ident : $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " $variant " node"]
                #[inline]
                pub fn [<is_ $method>](&self) -> bool {
                    matches!(self, Self::$variant(_))
                }

                #[doc = "Try to get as " $method " reference"]
                #[inline]
                pub fn [<as_ $method>](&self) -> Option<&$ty> {
                    match self {
                        Self::$variant(v) => {
                            let v: &$ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }

                #[doc = "Try to get as mutable " $method " reference"]
                #[inline]
                pub fn [<as_ $method _mut>](&mut self) -> Option<&mut $ty> {
                    match self {
                        Self::$variant(v) => {
                            let v: &mut $ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }
            )*
        }
    };
}
