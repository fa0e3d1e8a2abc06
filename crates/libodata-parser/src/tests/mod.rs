mod parser_tests;
mod source_span_tests;
