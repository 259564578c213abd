mod tests_description;
mod tests_scenarios;
