use serde::{Deserialize, Serialize};
use vdoc_core::{Document, Meta, SchemaVersion, Status, Validate, Validator};

use super::Config;

/// Module state: the lifecycle status, the configuration that was last
/// applied, and what applying it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub meta: Option<Meta>,
    pub status: Option<Status>,
    pub config: Option<Config>,
    pub output: Option<Output>,
    #[serde(skip)]
    pub unused: Vec<String>,
}

/// Values produced by applying the module. Not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub kubeconfig: Option<String>,
}

const STATE_KINDS: &[&str] = &[State::KIND];

impl State {
    pub fn init(module_version: &str) -> Self {
        State {
            meta: Some(Meta::new(
                Self::KIND,
                Self::SCHEMA_VERSION,
                module_version,
            )),
            status: Some(Status::Initialized),
            config: None,
            output: None,
            unused: vec![],
        }
    }
}

impl Document for State {
    const NAME: &'static str = "State";
    const KIND: &'static str = "azksState";
    const SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(0, 0, 1);

    /// Includes the unknown fields of the embedded config, rooted at
    /// `config.`.
    fn unused(&self) -> &[String] {
        &self.unused
    }

    fn set_unused(&mut self, unused: Vec<String>) {
        self.unused = unused;
    }
}

impl Validate for State {
    fn validate_into(&self, v: &mut Validator) {
        v.field("Meta", self.meta.as_ref())
            .required()
            .nested(|v, meta| meta.validate_into(v, STATE_KINDS, State::SCHEMA_VERSION));
        v.field("Status", self.status.as_ref().map(Status::as_str))
            .non_empty()
            .one_of(Status::ALLOWED);
        v.field("Config", self.config.as_ref())
            .nested(|v, config| config.validate_into(v));
    }
}
