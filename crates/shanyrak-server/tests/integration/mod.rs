mod common;
mod flow_tests;
