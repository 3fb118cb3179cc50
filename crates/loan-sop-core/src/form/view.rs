use serde::{Deserialize, Serialize};

use super::validation::ValidationReport;
use crate::schema::{fields_in, Control, FieldSpec, InputType, LoanSopRecord, Section};

/// Buttons shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormAction {
    Preview,
    Submit,
}

impl FormAction {
    pub fn label(self) -> &'static str {
        match self {
            FormAction::Preview => "Preview Document",
            FormAction::Submit => "Generate SOP Document",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One rendered control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub path: String,
    pub label: String,
    pub control: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    /// Select options, led by the empty "Select …" entry. Empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub required: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSectionView {
    pub section: Section,
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<FieldView>,
}

/// The whole editable form as a view description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub sections: Vec<FormSectionView>,
    pub error_count: usize,
    pub actions: Vec<FormAction>,
}

impl FormView {
    pub fn field(&self, path: &str) -> Option<&FieldView> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.path == path)
    }
}

/// Render one control per registered field, grouped into the ten sections.
/// Errors from `report`, when given, are attached inline.
pub fn render_form(record: &LoanSopRecord, report: Option<&ValidationReport>) -> FormView {
    let sections = Section::ALL
        .into_iter()
        .map(|section| FormSectionView {
            section,
            title: section.title().to_string(),
            subtitle: "Provide detailed information for this section".to_string(),
            fields: fields_in(section)
                .map(|spec| field_view(spec, record, report))
                .collect(),
        })
        .collect();

    FormView {
        sections,
        error_count: report.map(|r| r.errors.len()).unwrap_or(0),
        actions: vec![FormAction::Preview, FormAction::Submit],
    }
}

fn field_view(
    spec: &FieldSpec,
    record: &LoanSopRecord,
    report: Option<&ValidationReport>,
) -> FieldView {
    let (input_type, options) = match spec.control {
        Control::Input(t) => (Some(t), Vec::new()),
        Control::Select(opts) => {
            let mut options = vec![SelectOption {
                value: String::new(),
                label: format!("Select {}", spec.label),
            }];
            options.extend(opts.iter().map(|o| SelectOption {
                value: o.to_string(),
                label: o.to_string(),
            }));
            (None, options)
        }
        Control::TextArea => (None, Vec::new()),
    };

    FieldView {
        path: spec.path.to_string(),
        label: spec.label.to_string(),
        control: spec.control.kind().to_string(),
        input_type,
        options,
        required: spec.required,
        value: spec.value(record),
        placeholder: spec.placeholder.map(str::to_string),
        error: report
            .and_then(|r| r.error_for(spec.path))
            .map(|e| e.message.clone()),
    }
}
