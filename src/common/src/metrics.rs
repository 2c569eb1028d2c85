/// Creates a test that verifies that no two metrics have the same name.
#[macro_export]
#[rustfmt::skip]
macro_rules! test_no_duplicates {
    () => {
    };
}

pub use test_no_duplicates;
