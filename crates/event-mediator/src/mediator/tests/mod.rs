#[cfg(test)]
mod shared_tests;
#[cfg(test)]
mod subscriber_tests;
