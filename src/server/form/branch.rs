use entity::branch::BranchKind;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::server::{
    data::branch::BranchParams,
    error::form::FormErrors,
    form::{clean_text, merge_validation, parse_enum_choice},
};

/// Submitted branch fields
#[derive(Clone, Debug, Default, Deserialize, ToSchema, Validate)]
pub struct BranchForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub name: Option<String>,
    /// `cafe` or `hotel`, `cafe` when omitted
    pub kind: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub address: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 20, message = "Ensure this value has at most 20 characters.")
    )]
    pub phone: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub manager: Option<String>,
}

impl BranchForm {
    pub fn clean(self) -> Result<BranchParams, FormErrors> {
        let form = Self {
            name: clean_text(self.name),
            kind: clean_text(self.kind),
            address: clean_text(self.address),
            phone: clean_text(self.phone),
            manager: clean_text(self.manager),
        };

        let mut errors = FormErrors::new();
        merge_validation(&mut errors, form.validate());

        let kind = match form.kind.as_deref() {
            None => Some(BranchKind::default()),
            value => parse_enum_choice::<BranchKind>(&mut errors, "kind", value),
        };

        match (form.name, kind, form.address, form.phone, form.manager) {
            (Some(name), Some(kind), Some(address), Some(phone), Some(manager))
                if errors.is_empty() =>
            {
                Ok(BranchParams {
                    name,
                    kind,
                    address,
                    phone,
                    manager,
                })
            }
            _ => Err(errors),
        }
    }
}
