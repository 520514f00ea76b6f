pub mod test_home;

#[allow(unused_imports)]
pub use test_home::TestRootGuard;
