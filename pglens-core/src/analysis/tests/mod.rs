mod classify_tests;
mod report_tests;
