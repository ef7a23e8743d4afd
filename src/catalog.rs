//! The declarative hook catalog and its ingestion.
//!
//! The catalog is a typed value tree with three bins: `global_state`
//! (state-touching entries, with nested state classes), `actions`
//! (everything else that is recorded) and `unsupported` (entries that are
//! hooked only to report themselves). [`Catalog::into_registry`] validates
//! the tree, inherits the per-bin attributes, resolves aliases, and sorts
//! everything into the canonical emission order.
//!
//! Entry points are described by [`EntryDef`], a chainable builder whose
//! methods mirror the attributes of [`crate::registry::EntryPoint`].
//! Argument tokens use the `T1_T2_…_name` encoding: the final
//! underscore-separated segment is the argument name, the joined remainder
//! (with `ptr` rewritten to `*`) is the C type.

use log::warn;
use thiserror::Error;

use crate::registry::{
    Argument, DataField, EntryPoint, MultiState, Registry, StateClass, StateSlot,
    CALLING_CONVENTION,
};

/// Fatal configuration errors detected during catalog ingestion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate entry points in the hook catalog, please remove the duplicates: {}", .0.join(", "))]
    DuplicateEntries(Vec<String>),

    #[error("state classes may only be nested directly under GlobalState, found: {}", .0.join(", "))]
    NestedStateClass(Vec<String>),

    #[error("argument token `{0}` has no name segment (expected `Type_…_name`)")]
    BadArgumentToken(String),

    #[error("multi-state slot `{slot}` on `{entry}` has neither its own storage type nor a default")]
    UntypedMultiStateSlot { entry: String, slot: String },
}

/// Rewrites an underscore-encoded type spelling into C, e.g.
/// `const_GLubyte_ptr` into `const GLubyte*`.
fn decode_type(token: &str) -> String {
    token.replace('_', " ").replace(" ptr", "*")
}

/// Parses one `T1_T2_…_name` argument token.
fn parse_argument(token: &str, pointer_or_offset: Option<&str>) -> Result<Argument, CatalogError> {
    let pieces: Vec<&str> = token.split('_').collect();
    if pieces.len() < 2 {
        return Err(CatalogError::BadArgumentToken(token.to_string()));
    }
    let name = pieces[pieces.len() - 1].to_string();
    let ctype = pieces[..pieces.len() - 1].join(" ").replace(" ptr", "*");
    Ok(Argument {
        is_pointer: ctype.contains('*'),
        is_pointer_or_offset: pointer_or_offset == Some(name.as_str()),
        name,
        ctype,
    })
}

/// Declarative description of one entry point, before bin attributes are
/// applied. Construction replaces the decorator stack of the original hook
/// catalog: each method toggles one attribute and returns the builder.
#[derive(Debug, Clone)]
pub struct EntryDef {
    name: String,
    args: Vec<String>,
    returns: Option<String>,
    manual_state: bool,
    manual_detour: bool,
    manual_replay: bool,
    manual_restore: bool,
    static_hook: bool,
    public_real: bool,
    alias: Option<String>,
    multi_state: Option<MultiState>,
    pointer_or_offset: Option<String>,
}

impl EntryDef {
    pub fn new(name: &str, args: &[&str]) -> EntryDef {
        EntryDef {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            returns: None,
            manual_state: false,
            manual_detour: false,
            manual_replay: false,
            manual_restore: false,
            static_hook: false,
            public_real: false,
            alias: None,
            multi_state: None,
            pointer_or_offset: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The return type, in the same underscore encoding as argument tokens.
    pub fn returns(mut self, ty: &str) -> EntryDef {
        self.returns = Some(ty.to_string());
        self
    }

    /// The state setter is written by hand; only a prototype is emitted.
    pub fn manual_state(mut self) -> EntryDef {
        self.manual_state = true;
        self
    }

    /// The hook body is written by hand; only a prototype is emitted.
    pub fn manual_detour(mut self) -> EntryDef {
        self.manual_detour = true;
        self
    }

    /// Replay dispatches to a hand-written `ManualPlay_<name>`.
    pub fn manual_replay(mut self) -> EntryDef {
        self.manual_replay = true;
        self
    }

    /// Excluded from the automatic restore sweep.
    pub fn manual_restore(mut self) -> EntryDef {
        self.manual_restore = true;
        self
    }

    /// Resolved by static module lookup only, attached in its own phase.
    pub fn static_hook(mut self) -> EntryDef {
        self.static_hook = true;
        self
    }

    /// Exports the real-function pointer from the generated header.
    pub fn public_real(mut self) -> EntryDef {
        self.public_real = true;
        self
    }

    /// Reuses `target`'s packet variant and state call.
    pub fn alias(mut self, target: &str) -> EntryDef {
        self.alias = Some(target.to_string());
        self
    }

    /// Declares this entry a multi-state write: `param` selects one of
    /// `slots`, each stored as its own field typed by its own C type or by
    /// `default_ctype`.
    pub fn multi_state(
        mut self,
        param: &str,
        slots: Vec<StateSlot>,
        default_ctype: Option<&str>,
    ) -> EntryDef {
        self.multi_state = Some(MultiState {
            param: param.to_string(),
            slots,
            default_ctype: default_ctype.map(|t| t.to_string()),
        });
        self
    }

    /// Marks `param` as pointer-or-offset: its numeric value is either a
    /// client pointer or an offset into a bound buffer.
    pub fn pointer_or_offset(mut self, param: &str) -> EntryDef {
        self.pointer_or_offset = Some(param.to_string());
        self
    }

    /// Applies the bin attributes and produces the normalized entry point.
    pub(crate) fn into_entry_point(
        self,
        is_state: bool,
        supported: bool,
    ) -> Result<EntryPoint, CatalogError> {
        if let Some(ms) = &self.multi_state {
            if ms.default_ctype.is_none() {
                for slot in &ms.slots {
                    if let StateSlot::Named(name) = slot {
                        return Err(CatalogError::UntypedMultiStateSlot {
                            entry: self.name.clone(),
                            slot: name.clone(),
                        });
                    }
                }
            }
        }
        let args = self
            .args
            .iter()
            .map(|token| parse_argument(token, self.pointer_or_offset.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EntryPoint {
            name: self.name,
            return_type: self.returns.as_deref().map(decode_type).unwrap_or_else(|| "void".to_string()),
            calling_convention: CALLING_CONVENTION,
            args,
            is_state,
            needs_manual_state: self.manual_state,
            needs_manual_detour: self.manual_detour,
            needs_manual_replay: self.manual_replay,
            needs_manual_restore: self.manual_restore,
            needs_static_hook: self.static_hook,
            needs_public_real: self.public_real,
            supported,
            alias: self.alias,
            multi_state: self.multi_state,
        })
    }
}

/// A named group of state-touching entries that becomes one emitted class.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub entries: Vec<EntryDef>,
    /// Opaque persistent fields whose lifecycle is hand-written.
    pub data: Vec<(String, String)>,
    /// Nested groups. Always a configuration error; kept in the tree so the
    /// structural check can name the offender.
    pub classes: Vec<ClassDef>,
}

impl ClassDef {
    pub fn new(name: &str) -> ClassDef {
        ClassDef {
            name: name.to_string(),
            entries: Vec::new(),
            data: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn entry(mut self, def: EntryDef) -> ClassDef {
        self.entries.push(def);
        self
    }

    pub fn entries(mut self, defs: Vec<EntryDef>) -> ClassDef {
        self.entries.extend(defs);
        self
    }

    pub fn data(mut self, name: &str, ctype: &str) -> ClassDef {
        self.data.push((name.to_string(), ctype.to_string()));
        self
    }

    pub fn class(mut self, class: ClassDef) -> ClassDef {
        self.classes.push(class);
        self
    }
}

/// One bin of the catalog: loose entries plus (for `global_state` only)
/// nested state classes.
#[derive(Debug, Clone, Default)]
pub struct Bin {
    pub entries: Vec<EntryDef>,
    pub classes: Vec<ClassDef>,
}

impl Bin {
    pub fn of(entries: Vec<EntryDef>) -> Bin {
        Bin {
            entries,
            classes: Vec::new(),
        }
    }

    pub fn class(mut self, class: ClassDef) -> Bin {
        self.classes.push(class);
        self
    }
}

/// The whole declarative input: three bins, one catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub global_state: Bin,
    pub actions: Bin,
    pub unsupported: Bin,
}

impl Catalog {
    /// Validates the tree and produces the sorted registry.
    ///
    /// Fatal errors: state classes nested anywhere but directly under
    /// `GlobalState`, duplicate entry-point names across all bins, malformed
    /// argument tokens, untyped multi-state slots.
    pub fn into_registry(self) -> Result<Registry, CatalogError> {
        let mut nested: Vec<String> = Vec::new();
        for class in &self.actions.classes {
            nested.push(format!("Actions.{}", class.name));
        }
        for class in &self.unsupported.classes {
            nested.push(format!("Unsupported.{}", class.name));
        }
        for class in &self.global_state.classes {
            for inner in &class.classes {
                nested.push(format!("GlobalState.{}.{}", class.name, inner.name));
            }
        }
        if !nested.is_empty() {
            nested.sort();
            return Err(CatalogError::NestedStateClass(nested));
        }

        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        {
            let all_names = self
                .global_state
                .entries
                .iter()
                .chain(self.global_state.classes.iter().flat_map(|c| c.entries.iter()))
                .chain(self.actions.entries.iter())
                .chain(self.unsupported.entries.iter())
                .map(|def| def.name());
            for name in all_names {
                if !seen.insert(name.to_string()) && !duplicates.contains(&name.to_string()) {
                    duplicates.push(name.to_string());
                }
            }
        }
        if !duplicates.is_empty() {
            duplicates.sort();
            return Err(CatalogError::DuplicateEntries(duplicates));
        }

        let mut entries: Vec<EntryPoint> = Vec::new();
        for def in self.global_state.entries {
            entries.push(def.into_entry_point(true, true)?);
        }

        let mut state_classes: Vec<StateClass> = Vec::new();
        for class in self.global_state.classes {
            let mut members = Vec::new();
            for def in class.entries {
                members.push(def.into_entry_point(true, true)?);
            }
            members.sort_by(|a, b| a.name.cmp(&b.name));
            entries.extend(members.iter().cloned());
            state_classes.push(StateClass {
                name: class.name,
                members,
                data: class
                    .data
                    .into_iter()
                    .map(|(name, ctype)| DataField { name, ctype })
                    .collect(),
            });
        }

        for def in self.actions.entries {
            entries.push(def.into_entry_point(false, true)?);
        }
        for def in self.unsupported.entries {
            entries.push(def.into_entry_point(false, false)?);
        }

        for entry in &entries {
            if entry.is_state && entry.needs_manual_state && !entry.needs_manual_restore {
                warn!(
                    "{} is manual-state but not manual-restore; nothing will restore it automatically",
                    entry.name
                );
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        state_classes.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Registry {
            entries,
            state_classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(name: &str, args: &[&str]) -> EntryDef {
        EntryDef::new(name, args)
    }

    #[test]
    fn decodes_argument_tokens() {
        let arg = parse_argument("const_GLchar_ptr_ptr_string", None).unwrap();
        assert_eq!(arg.name, "string");
        assert_eq!(arg.ctype, "const GLchar**");
        assert!(arg.is_pointer);
        assert!(!arg.is_pointer_or_offset);
    }

    #[test]
    fn rejects_token_without_name_segment() {
        assert_eq!(
            parse_argument("GLenum", None),
            Err(CatalogError::BadArgumentToken("GLenum".to_string()))
        );
    }

    #[test]
    fn decodes_return_type_tokens() {
        let entry = e("glGetString", &["GLenum_name"])
            .returns("const_GLubyte_ptr")
            .into_entry_point(false, true)
            .unwrap();
        assert_eq!(entry.return_type, "const GLubyte*");
    }

    #[test]
    fn bins_assign_state_and_support() {
        let catalog = Catalog {
            global_state: Bin::default()
                .class(ClassDef::new("ContextState").entry(e("glEnable", &["GLenum_cap"]))),
            actions: Bin::of(vec![e("glClear", &["GLbitfield_mask"])]),
            unsupported: Bin::of(vec![e("glBegin", &["GLenum_mode"])]),
        };
        let registry = catalog.into_registry().unwrap();
        let find = |name: &str| registry.entries.iter().find(|e| e.name == name).unwrap();
        assert!(find("glEnable").is_state);
        assert!(find("glEnable").supported);
        assert!(!find("glClear").is_state);
        assert!(find("glClear").supported);
        assert!(!find("glBegin").supported);
    }

    #[test]
    fn entries_and_classes_come_out_sorted() {
        let catalog = Catalog {
            global_state: Bin::default()
                .class(
                    ClassDef::new("ZState")
                        .entry(e("glViewport", &["GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height"])),
                )
                .class(ClassDef::new("AState").entry(e("glEnable", &["GLenum_cap"]))),
            actions: Bin::of(vec![
                e("glFlush", &[]),
                e("glClear", &["GLbitfield_mask"]),
            ]),
            unsupported: Bin::default(),
        };
        let registry = catalog.into_registry().unwrap();
        let names: Vec<&str> = registry.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["glClear", "glEnable", "glFlush", "glViewport"]);
        let classes: Vec<&str> = registry
            .state_classes
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(classes, vec!["AState", "ZState"]);
    }

    #[test]
    fn duplicates_are_fatal_and_enumerated() {
        let catalog = Catalog {
            global_state: Bin::default()
                .class(ClassDef::new("ContextState").entry(e("glEnable", &["GLenum_cap"]))),
            actions: Bin::of(vec![
                e("glEnable", &["GLenum_cap"]),
                e("glClear", &["GLbitfield_mask"]),
                e("glClear", &["GLbitfield_mask"]),
            ]),
            unsupported: Bin::default(),
        };
        assert_eq!(
            catalog.into_registry(),
            Err(CatalogError::DuplicateEntries(vec![
                "glClear".to_string(),
                "glEnable".to_string()
            ]))
        );
    }

    #[test]
    fn nested_classes_outside_global_state_are_fatal() {
        let catalog = Catalog {
            global_state: Bin::default(),
            actions: Bin::default().class(ClassDef::new("Sneaky")),
            unsupported: Bin::default(),
        };
        assert_eq!(
            catalog.into_registry(),
            Err(CatalogError::NestedStateClass(vec![
                "Actions.Sneaky".to_string()
            ]))
        );
    }

    #[test]
    fn doubly_nested_state_classes_are_fatal() {
        let catalog = Catalog {
            global_state: Bin::default()
                .class(ClassDef::new("ContextState").class(ClassDef::new("Inner"))),
            actions: Bin::default(),
            unsupported: Bin::default(),
        };
        assert_eq!(
            catalog.into_registry(),
            Err(CatalogError::NestedStateClass(vec![
                "GlobalState.ContextState.Inner".to_string()
            ]))
        );
    }

    #[test]
    fn untyped_multi_state_slot_is_fatal() {
        let def = e("glPixelTransferf", &["GLenum_pname", "GLfloat_param"]).multi_state(
            "pname",
            vec![StateSlot::Named("GL_RED_SCALE".to_string())],
            None,
        );
        assert_eq!(
            def.into_entry_point(true, true),
            Err(CatalogError::UntypedMultiStateSlot {
                entry: "glPixelTransferf".to_string(),
                slot: "GL_RED_SCALE".to_string(),
            })
        );
    }
}
