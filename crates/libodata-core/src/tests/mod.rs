mod config_tests;
mod fixtures;
mod resolver_tests;
