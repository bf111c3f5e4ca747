/// Implement [`Path`](crate::traits::Path) and [`Pojo`](crate::traits::Pojo)
/// for a plain struct, exposing the listed attributes by name.
///
/// Every listed attribute must implement
/// [`FieldValue`](crate::value::FieldValue).
#[macro_export]
macro_rules! impl_pojo {
    ($ty:ty, $path:literal, { $($field:ident),* $(,)? }) => {
        impl $crate::traits::Path for $ty {
            const PATH: &'static str = $path;
        }

        impl $crate::traits::Pojo for $ty {
            fn class_path(&self) -> &'static str {
                <Self as $crate::traits::Path>::PATH
            }

            fn get_value(&self, field: &str) -> Option<$crate::value::Value> {
                match field {
                    $(
                        stringify!($field) => {
                            Some($crate::value::FieldValue::to_value(&self.$field))
                        }
                    )*
                    _ => None,
                }
            }

            fn set_value(
                &mut self,
                field: &str,
                value: $crate::value::Value,
            ) -> Result<(), $crate::traits::FieldError> {
                match field {
                    $(
                        stringify!($field) => {
                            $crate::traits::assign_field(&mut self.$field, field, value)
                        }
                    )*
                    _ => Err($crate::traits::FieldError::UnknownField(field.to_string())),
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}
