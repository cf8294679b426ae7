//! Data model for scanned documentation — format-agnostic.
//!
//! A [`ModuleDoc`] owns every other record of a source unit. Child records
//! are the closed [`DocInfo`] set, which has no module case, so modules
//! cannot nest.

use serde_json::{Map, Value};
use std::fmt;

/// Name given to a module that no `\module` directive named.
pub const ANONYMOUS_MODULE: &str = "anonymous";

/// The four record kinds a doc-string can open with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Module,
    Function,
    Constant,
    Type,
}

impl DocKind {
    pub const ALL: [DocKind; 4] = [
        DocKind::Module,
        DocKind::Function,
        DocKind::Constant,
        DocKind::Type,
    ];

    /// Resolve the kind named by a group's first directive.
    pub fn from_directive(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Module => "module",
            DocKind::Function => "function",
            DocKind::Constant => "constant",
            DocKind::Type => "type",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Records ------------------------------------------------------------------

/// Fields every record kind carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocCommon {
    pub name: String,
    /// `\abstract`, a one-line summary
    pub abstract_text: Option<String>,
    pub discussion: Option<String>,
    /// `\see_also` entries, one per directive
    pub see_also: Vec<String>,
}

impl DocCommon {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// The top-level record of a source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDoc {
    pub common: DocCommon,
    /// Child records in the order their doc-strings were encountered
    pub children: Vec<DocInfo>,
}

impl ModuleDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: DocCommon::named(name),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDoc {
    pub common: DocCommon,
    /// e.g. `(<num> <num> -- <num>)`
    pub signature: Option<String>,
    pub params: Vec<String>,
    pub returns: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantDoc {
    pub common: DocCommon,
    /// Set by `\type` inside a constant doc-string.
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDoc {
    pub common: DocCommon,
    pub supertype: Option<String>,
    pub fields: Vec<String>,
}

/// A record that lives inside a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocInfo {
    Function(FunctionDoc),
    Constant(ConstantDoc),
    Type(TypeDoc),
}

impl DocInfo {
    /// Fresh child record of `kind`; `None` for [`DocKind::Module`].
    pub fn new(kind: DocKind, name: impl Into<String>) -> Option<Self> {
        let common = DocCommon::named(name);
        match kind {
            DocKind::Module => None,
            DocKind::Function => Some(DocInfo::Function(FunctionDoc {
                common,
                ..Default::default()
            })),
            DocKind::Constant => Some(DocInfo::Constant(ConstantDoc {
                common,
                ..Default::default()
            })),
            DocKind::Type => Some(DocInfo::Type(TypeDoc {
                common,
                ..Default::default()
            })),
        }
    }

    pub fn kind(&self) -> DocKind {
        match self {
            DocInfo::Function(_) => DocKind::Function,
            DocInfo::Constant(_) => DocKind::Constant,
            DocInfo::Type(_) => DocKind::Type,
        }
    }

    pub fn common(&self) -> &DocCommon {
        match self {
            DocInfo::Function(f) => &f.common,
            DocInfo::Constant(c) => &c.common,
            DocInfo::Type(t) => &t.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }
}

// -- Field dispatch -----------------------------------------------------------

/// Assigns a directive's contents into one field of `T`.
pub type Setter<T> = fn(&mut T, String);

/// Directive name → setter. Scalars overwrite, lists append.
pub type FieldTable<T> = &'static [(&'static str, Setter<T>)];

const COMMON_FIELDS: FieldTable<DocCommon> = &[
    ("name", |r, v| r.name = v),
    ("abstract", |r, v| r.abstract_text = Some(v)),
    ("discussion", |r, v| r.discussion = Some(v)),
    ("see_also", |r, v| r.see_also.push(v)),
];

const FUNCTION_FIELDS: FieldTable<FunctionDoc> = &[
    ("signature", |r, v| r.signature = Some(v)),
    ("params", |r, v| r.params.push(v)),
    ("returns", |r, v| r.returns = Some(v)),
];

const CONSTANT_FIELDS: FieldTable<ConstantDoc> = &[("type", |r, v| r.value_type = Some(v))];

const TYPE_FIELDS: FieldTable<TypeDoc> = &[
    ("supertype", |r, v| r.supertype = Some(v)),
    ("fields", |r, v| r.fields.push(v)),
];

fn lookup<T: 'static>(table: FieldTable<T>, field: &str) -> Option<Setter<T>> {
    table
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, set)| *set)
}

/// Field directives a record of `kind` accepts, kind-specific ones first.
pub fn field_names(kind: DocKind) -> Vec<&'static str> {
    let specific: Vec<&'static str> = match kind {
        DocKind::Module => Vec::new(),
        DocKind::Function => FUNCTION_FIELDS.iter().map(|(n, _)| *n).collect(),
        DocKind::Constant => CONSTANT_FIELDS.iter().map(|(n, _)| *n).collect(),
        DocKind::Type => TYPE_FIELDS.iter().map(|(n, _)| *n).collect(),
    };
    specific
        .into_iter()
        .chain(COMMON_FIELDS.iter().map(|(n, _)| *n))
        .collect()
}

impl DocCommon {
    /// Returns `false` when `field` is not a common field.
    pub fn set_field(&mut self, field: &str, contents: String) -> bool {
        match lookup(COMMON_FIELDS, field) {
            Some(set) => {
                set(self, contents);
                true
            }
            None => false,
        }
    }
}

impl ModuleDoc {
    pub fn set_field(&mut self, field: &str, contents: String) -> bool {
        self.common.set_field(field, contents)
    }
}

impl DocInfo {
    /// Assign `contents` to the field named `field`.
    ///
    /// Returns `false` (and leaves the record untouched) when this kind has
    /// no such field.
    pub fn set_field(&mut self, field: &str, contents: String) -> bool {
        match self {
            DocInfo::Function(f) => match lookup(FUNCTION_FIELDS, field) {
                Some(set) => {
                    set(f, contents);
                    true
                }
                None => f.common.set_field(field, contents),
            },
            DocInfo::Constant(c) => match lookup(CONSTANT_FIELDS, field) {
                Some(set) => {
                    set(c, contents);
                    true
                }
                None => c.common.set_field(field, contents),
            },
            DocInfo::Type(t) => match lookup(TYPE_FIELDS, field) {
                Some(set) => {
                    set(t, contents);
                    true
                }
                None => t.common.set_field(field, contents),
            },
        }
    }
}

// -- Mapping export -----------------------------------------------------------

/// Controls [`ModuleDoc::to_map`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MapOptions {
    /// Emit absent scalars as `null` and empty lists as `[]`.
    pub include_empty: bool,
}

/// Key-ordered mapping builder that drops absent values unless asked not to.
struct MapBuilder<'a> {
    map: Map<String, Value>,
    opts: &'a MapOptions,
}

impl<'a> MapBuilder<'a> {
    fn new(opts: &'a MapOptions) -> Self {
        Self {
            map: Map::new(),
            opts,
        }
    }

    fn text(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), Value::from(value));
    }

    fn opt(&mut self, key: &str, value: &Option<String>) {
        match value {
            Some(v) => self.text(key, v),
            None if self.opts.include_empty => {
                self.map.insert(key.to_string(), Value::Null);
            }
            None => {}
        }
    }

    fn list(&mut self, key: &str, items: &[String]) {
        if !items.is_empty() || self.opts.include_empty {
            let values = items.iter().map(|s| Value::from(s.as_str())).collect();
            self.map.insert(key.to_string(), Value::Array(values));
        }
    }

    fn common(&mut self, common: &DocCommon, kind: DocKind) {
        self.text("name", &common.name);
        self.opt("abstract", &common.abstract_text);
        self.opt("discussion", &common.discussion);
        self.list("see_also", &common.see_also);
        self.text("type", kind.as_str());
    }
}

impl ModuleDoc {
    /// Export as `{name, abstract, discussion, see_also, type, doc_infos}`.
    pub fn to_map(&self, opts: &MapOptions) -> Map<String, Value> {
        let mut b = MapBuilder::new(opts);
        b.common(&self.common, DocKind::Module);
        let children = self
            .children
            .iter()
            .map(|child| Value::Object(child.to_map(opts)))
            .collect();
        b.map.insert("doc_infos".to_string(), Value::Array(children));
        b.map
    }
}

impl DocInfo {
    pub fn to_map(&self, opts: &MapOptions) -> Map<String, Value> {
        let mut b = MapBuilder::new(opts);
        b.common(self.common(), self.kind());
        match self {
            DocInfo::Function(f) => {
                b.opt("signature", &f.signature);
                b.list("params", &f.params);
                b.opt("returns", &f.returns);
            }
            // The constant's own type cannot reuse the `type` key
            DocInfo::Constant(c) => b.opt("value_type", &c.value_type),
            DocInfo::Type(t) => {
                b.opt("supertype", &t.supertype);
                b.list("fields", &t.fields);
            }
        }
        b.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn kind_from_directive() {
        assert_eq!(DocKind::from_directive("module"), Some(DocKind::Module));
        assert_eq!(DocKind::from_directive("type"), Some(DocKind::Type));
        assert_eq!(DocKind::from_directive("Module"), None);
        assert_eq!(DocKind::from_directive("abstract"), None);
    }

    #[test]
    fn no_child_record_for_module_kind() {
        assert!(DocInfo::new(DocKind::Module, "m").is_none());
        assert_eq!(
            DocInfo::new(DocKind::Constant, "PI").map(|c| c.kind()),
            Some(DocKind::Constant)
        );
    }

    #[test]
    fn scalar_fields_overwrite() {
        let mut f = DocInfo::new(DocKind::Function, "f").unwrap();
        assert!(f.set_field("returns", "<num>".into()));
        assert!(f.set_field("returns", "<string>".into()));
        assert!(f.set_field("name", "g".into()));
        let DocInfo::Function(f) = f else {
            panic!("expected function");
        };
        assert_eq!(f.returns.as_deref(), Some("<string>"));
        assert_eq!(f.common.name, "g");
    }

    #[test]
    fn list_fields_append() {
        let mut t = DocInfo::new(DocKind::Type, "Point").unwrap();
        t.set_field("fields", "x".into());
        t.set_field("fields", "y".into());
        t.set_field("see_also", "Size".into());
        t.set_field("see_also", "Rect".into());
        let DocInfo::Type(t) = t else {
            panic!("expected type");
        };
        assert_eq!(t.fields, vec!["x", "y"]);
        assert_eq!(t.common.see_also, vec!["Size", "Rect"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut f = DocInfo::new(DocKind::Function, "f").unwrap();
        let before = f.clone();
        assert!(!f.set_field("supertype", "x".into()));
        // `type` is only a field of constants
        assert!(!f.set_field("type", "x".into()));
        assert_eq!(f, before);

        let mut m = ModuleDoc::new("m");
        assert!(!m.set_field("doc_infos", "x".into()));
        assert!(m.set_field("discussion", "d".into()));
    }

    #[test]
    fn field_names_per_kind() {
        assert_eq!(
            field_names(DocKind::Constant),
            vec!["type", "name", "abstract", "discussion", "see_also"]
        );
        assert_eq!(
            field_names(DocKind::Module),
            vec!["name", "abstract", "discussion", "see_also"]
        );
    }

    #[test]
    fn module_map_key_order() {
        let mut m = ModuleDoc::new("gfx");
        m.set_field("abstract", "Drawing".into());
        let mut c = DocInfo::new(DocKind::Constant, "PI").unwrap();
        c.set_field("type", "<num>".into());
        m.children.push(c);

        let map = m.to_map(&MapOptions::default());
        assert_eq!(keys(&map), vec!["name", "abstract", "type", "doc_infos"]);
        assert_eq!(map["type"], "module");

        let child = map["doc_infos"][0].as_object().unwrap();
        assert_eq!(keys(child), vec!["name", "type", "value_type"]);
        assert_eq!(child["type"], "constant");
        assert_eq!(child["value_type"], "<num>");
    }

    #[test]
    fn include_empty_emits_every_key() {
        let f = DocInfo::new(DocKind::Function, "f").unwrap();
        let map = f.to_map(&MapOptions {
            include_empty: true,
        });
        assert_eq!(
            keys(&map),
            vec![
                "name",
                "abstract",
                "discussion",
                "see_also",
                "type",
                "signature",
                "params",
                "returns"
            ]
        );
        assert!(map["abstract"].is_null());
        assert_eq!(map["params"], Value::Array(Vec::new()));
    }

    #[test]
    fn empty_module_still_lists_children() {
        let map = ModuleDoc::new(ANONYMOUS_MODULE).to_map(&MapOptions::default());
        assert_eq!(keys(&map), vec!["name", "type", "doc_infos"]);
        assert_eq!(map["doc_infos"], Value::Array(Vec::new()));
    }
}
