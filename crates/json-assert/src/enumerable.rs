/// A closed set of values that can be listed in a fixed order.
///
/// [`assert_round_trips_all`](crate::assert_round_trips_all) walks every
/// member in the order returned here.
pub trait Enumerable: Sized {
    fn all_cases() -> Vec<Self>;
}

impl Enumerable for bool {
    fn all_cases() -> Vec<Self> {
        vec![false, true]
    }
}

/// Implement [`Enumerable`] for a fieldless enum by listing its variants in
/// declaration order.
///
/// ```
/// use jsonkit_assert::{enumerable, Enumerable};
///
/// #[derive(Debug, PartialEq)]
/// enum Suit { Clubs, Hearts }
/// enumerable!(Suit { Clubs, Hearts });
///
/// assert_eq!(Suit::all_cases(), vec![Suit::Clubs, Suit::Hearts]);
/// ```
#[macro_export]
macro_rules! enumerable {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::Enumerable for $ty {
            fn all_cases() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),+]
            }
        }
    };
}
