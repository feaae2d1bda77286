#[cfg(test)]
mod directory_tests;
