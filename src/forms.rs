//! Form-field descriptors handed to whatever renders input forms.

use serde::{Deserialize, Serialize};

use crate::core::{DataType, Value};
use crate::fields::{ChoiceSet, FieldKind};
use crate::schema::FieldDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Widget {
    TextInput,
    NumberInput,
    CheckboxInput,
    DateInput,
    DateTimeInput,
    SelectMultiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub help_text: String,
    pub choices: Option<ChoiceSet>,
    pub initial: Option<Value>,
    pub widget: Widget,
}

impl FormField {
    pub fn for_field(field: &FieldDef) -> Self {
        let options = field.options();
        let verbose = options
            .verbose_name
            .clone()
            .unwrap_or_else(|| field.name().replace('_', " "));

        let widget = match field.kind() {
            FieldKind::MultipleChoice(_) => Widget::SelectMultiple,
            FieldKind::Scalar(scalar) => match scalar.data_type() {
                DataType::Text => Widget::TextInput,
                DataType::Integer | DataType::Float => Widget::NumberInput,
                DataType::Boolean => Widget::CheckboxInput,
                DataType::Date => Widget::DateInput,
                DataType::Timestamp => Widget::DateTimeInput,
            },
        };

        Self {
            name: field.name().to_string(),
            label: capfirst(&verbose),
            required: !options.blank,
            help_text: options.help_text.clone(),
            choices: field.kind().choices().cloned(),
            initial: field.get_default().cloned(),
            widget,
        }
    }
}

fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_choice_form_field() {
        let choices = ChoiceSet::new([("facebook", "Facebook"), ("twitter", "Twitter")]).unwrap();
        let field = FieldDef::multiple_choice("social_channels", choices.clone())
            .default("facebook,twitter")
            .help_text("Where to publish");

        let form = field.form_field();
        assert_eq!(form.label, "Social channels");
        assert!(form.required);
        assert_eq!(form.help_text, "Where to publish");
        assert_eq!(form.choices, Some(choices));
        assert_eq!(form.initial, Some(Value::from("facebook,twitter")));
        assert_eq!(form.widget, Widget::SelectMultiple);
    }

    #[test]
    fn test_scalar_form_field() {
        let form = FieldDef::integer("views").blank().verbose_name("page views").form_field();
        assert_eq!(form.label, "Page views");
        assert!(!form.required);
        assert_eq!(form.choices, None);
        assert_eq!(form.initial, None);
        assert_eq!(form.widget, Widget::NumberInput);
    }

    #[test]
    fn test_form_field_serializes() {
        let form = FieldDef::text("title").form_field();
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["label"], "Title");
        assert_eq!(json["widget"], "TextInput");
    }
}
