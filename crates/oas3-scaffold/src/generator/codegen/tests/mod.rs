mod fixture_tests;
mod support;
