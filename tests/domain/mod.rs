mod embedding_test;
mod prompt_template_test;
