use crate::traits::Pojo;

///
/// Resolved
///
/// Outcome of decoding a row through a type entity. Failures travel
/// separately as errors; an unrelated discriminator is not one.
///

#[derive(Debug)]
pub enum Resolved {
    /// The row decoded into an object of the descriptor's class or a subtype.
    Object(Box<dyn Pojo>),

    /// No row was supplied.
    Empty,

    /// The row belongs to a registered type outside this descriptor's branch.
    Unrelated { discriminator: String },
}

impl Resolved {
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_unrelated(&self) -> bool {
        matches!(self, Self::Unrelated { .. })
    }

    #[must_use]
    pub fn object(&self) -> Option<&dyn Pojo> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_object(self) -> Option<Box<dyn Pojo>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Decoded object as `T`, or `None` for any other outcome or type.
    #[must_use]
    pub fn downcast<T: Pojo>(self) -> Option<Box<T>> {
        self.into_object()?.downcast::<T>()
    }
}
