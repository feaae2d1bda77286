#[cfg(test)]
mod options_tests;
