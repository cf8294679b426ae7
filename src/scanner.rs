//! Document scanner — folds directive groups into typed records.
//!
//! Each group runs through a small state machine, reset between groups:
//!
//! - the first directive must name a record kind, otherwise the whole group
//!   is abandoned with a warning;
//! - every later directive is a field assignment into that record, and
//!   unknown field names only cost a warning;
//! - at the end of the group the record is attached to the unit's module.
//!
//! Nothing here fails. All anomalies end up in [`ScanResult::warnings`].

use crate::lexer::{Directive, DirectiveGroup};
use crate::model::{field_names, DocInfo, DocKind, ModuleDoc, ANONYMOUS_MODULE};
use std::fmt;

/// Non-fatal diagnostic produced while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A group opened with a directive that is not a record kind.
    UnsupportedKind { name: String },
    /// A field directive the active record does not have.
    UnknownDirective { kind: DocKind, name: String },
    /// A second `\module` directive in the same unit.
    ModuleRedefined { previous: String, name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedKind { name } => write!(f, "unsupported doc type {}", name),
            Warning::UnknownDirective { kind, name } => write!(
                f,
                "did not recognize directive {} for {}, ignoring (expected one of: {})",
                name,
                kind,
                field_names(*kind).join(", ")
            ),
            Warning::ModuleRedefined { previous, name } => write!(
                f,
                "module {} redefines module {}, keeping its children",
                name, previous
            ),
        }
    }
}

/// Everything scanned out of one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Identifying name of the unit (usually a file name)
    pub unit_name: Option<String>,
    pub module: ModuleDoc,
    pub warnings: Vec<Warning>,
}

impl ScanResult {
    fn new(unit_name: Option<&str>) -> Self {
        Self {
            unit_name: unit_name.map(str::to_string),
            module: ModuleDoc::new(unit_name.unwrap_or(ANONYMOUS_MODULE)),
            warnings: Vec::new(),
        }
    }
}

/// The record a group is currently filling in.
enum Active {
    Module(ModuleDoc),
    Child(DocInfo),
}

impl Active {
    fn kind(&self) -> DocKind {
        match self {
            Active::Module(_) => DocKind::Module,
            Active::Child(info) => info.kind(),
        }
    }

    fn set_field(&mut self, field: &str, contents: String) -> bool {
        match self {
            Active::Module(m) => m.set_field(field, contents),
            Active::Child(info) => info.set_field(field, contents),
        }
    }
}

/// Per-group state.
enum State {
    AwaitingKind,
    Abandoned,
    AssigningFields(Active),
}

struct Scanner {
    result: ScanResult,
    /// Set once a `\module` directive has named the unit's module
    module_declared: bool,
}

// -- Public API ---------------------------------------------------------------

/// Scan the directive groups of one unit.
///
/// Groups are processed in order; children keep that order in the module.
pub fn scan(groups: Vec<DirectiveGroup>, unit_name: Option<&str>) -> ScanResult {
    let mut scanner = Scanner {
        result: ScanResult::new(unit_name),
        module_declared: false,
    };
    for group in groups {
        scanner.scan_group(group);
    }
    tracing::debug!(
        module = scanner.result.module.name(),
        children = scanner.result.module.children.len(),
        warnings = scanner.result.warnings.len(),
        "scanned unit"
    );
    scanner.result
}

// -- Group processing ---------------------------------------------------------

impl Scanner {
    fn scan_group(&mut self, group: DirectiveGroup) {
        let mut state = State::AwaitingKind;

        for directive in group {
            state = match state {
                State::AwaitingKind => self.open_record(directive),
                State::Abandoned => State::Abandoned,
                State::AssigningFields(mut active) => {
                    let Directive { name, contents } = directive;
                    if !active.set_field(&name, contents) {
                        self.warn(Warning::UnknownDirective {
                            kind: active.kind(),
                            name,
                        });
                    }
                    State::AssigningFields(active)
                }
            };
        }

        if let State::AssigningFields(active) = state {
            self.finish_record(active);
        }
    }

    fn open_record(&mut self, directive: Directive) -> State {
        let Some(kind) = DocKind::from_directive(&directive.name) else {
            self.warn(Warning::UnsupportedKind {
                name: directive.name,
            });
            return State::Abandoned;
        };

        let active = match DocInfo::new(kind, directive.contents.as_str()) {
            Some(info) => Active::Child(info),
            None => {
                if self.module_declared {
                    self.warn(Warning::ModuleRedefined {
                        previous: self.result.module.name().to_string(),
                        name: directive.contents.clone(),
                    });
                }
                self.module_declared = true;
                Active::Module(ModuleDoc::new(directive.contents))
            }
        };
        State::AssigningFields(active)
    }

    fn finish_record(&mut self, active: Active) {
        match active {
            // The declared module takes over the unit's identity; children
            // gathered so far stay attached.
            Active::Module(module) => self.result.module.common = module.common,
            Active::Child(info) => self.result.module.children.push(info),
        }
    }

    fn warn(&mut self, warning: Warning) {
        tracing::debug!(%warning, "scan warning");
        self.result.warnings.push(warning);
    }
}
