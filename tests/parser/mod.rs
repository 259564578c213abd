mod tests_errors;
mod tests_statements;
