mod json_template_registry;

pub use json_template_registry::JsonTemplateRegistry;
