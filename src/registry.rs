//! The normalized hook registry.
//!
//! A [`Registry`] is the immutable output of catalog ingestion: every hooked
//! entry point in canonical (lexicographic) order, plus the state classes
//! with their members and opaque data fields. The types here also carry the
//! small target-text helpers (declaration strings, member names, cast
//! spellings) that both emitters lean on.

use std::fmt;
use std::io;

use crate::length;
use crate::Generator;

/// Calling convention stamped onto every emitted prototype and pointer cast.
pub const CALLING_CONVENTION: &str = "APIENTRY";

/// Name prefix of the emitted hook trampolines.
pub const HOOKED_PREFIX: &str = "hooked_";

/// Name prefix of the real-function pointer slots.
pub const REAL_PREFIX: &str = "gReal_";

/// Name prefix of the pointer-length helpers.
pub const DETERMINE_POINTER_LENGTH_PREFIX: &str = "determinePointerLength_";

/// Name of the emitted packet struct.
pub const DATA_PACKET_STRUCT: &str = "SSerializeDataPacket";

/// One argument of a hooked entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Identifier, e.g. `texture`.
    pub name: String,
    /// C type spelling, e.g. `const GLuint*`.
    pub ctype: String,
    /// True iff the C type contains a `*`.
    pub is_pointer: bool,
    /// True iff the owning entry declared this argument under its
    /// `pointer_or_offset` attribute.
    pub is_pointer_or_offset: bool,
}

impl Argument {
    /// The C type with one `*` stripped, e.g. `const GLuint` for
    /// `const GLuint*`. Used to size buffer elements.
    pub fn underlying_type(&self) -> String {
        self.ctype.replacen('*', "", 1)
    }

    pub fn is_const(&self) -> bool {
        self.ctype.contains("const ")
    }

    /// The C type without `const`, the spelling `const_cast` targets.
    pub fn lvalue_type(&self) -> String {
        self.ctype.replace("const ", "")
    }

    /// Name of the companion flag recording whether a pointer-or-offset
    /// argument held a real pointer.
    pub fn pointer_or_offset_name(&self) -> String {
        format!("isPointer_{}", self.name)
    }

    /// Name of the pointer-length helper for this argument of `function`.
    pub fn length_fn(&self, function: &str) -> String {
        format!(
            "{}{}_{}",
            DETERMINE_POINTER_LENGTH_PREFIX, function, self.name
        )
    }

    pub fn as_data_declaration(&self) -> String {
        format!("{} {}", self.ctype, self.name)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.ctype, self.name)
    }
}

/// One storage slot of a multi-state entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateSlot {
    /// Slot typed by the entry's default slot C type.
    Named(String),
    /// Slot carrying its own C type.
    Typed { name: String, ctype: String },
}

/// Attribute of an entry point that writes one of several state slots,
/// selected by one of its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiState {
    /// Name of the parameter that selects the slot.
    pub param: String,
    pub slots: Vec<StateSlot>,
    /// Storage type for [`StateSlot::Named`] slots.
    pub default_ctype: Option<String>,
}

impl MultiState {
    /// The member list of the storage struct, one `data_<slot>` per slot.
    pub fn data_struct(&self) -> String {
        let default_ctype = self.default_ctype.as_deref().unwrap_or("GLenum");
        self.slots
            .iter()
            .map(|slot| match slot {
                StateSlot::Named(name) => format!("{} data_{};", default_ctype, name),
                StateSlot::Typed { name, ctype } => format!("{} data_{};", ctype, name),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A single hooked GL entry point with its emission attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub return_type: String,
    pub calling_convention: &'static str,
    pub args: Vec<Argument>,
    /// Entry touches context state; the hook forwards into the state class.
    pub is_state: bool,
    /// The state setter is hand-written; only its prototype is emitted.
    pub needs_manual_state: bool,
    /// The hook body is hand-written; only its prototype is emitted.
    pub needs_manual_detour: bool,
    /// Replay goes through a hand-written `ManualPlay_<name>`.
    pub needs_manual_replay: bool,
    /// Excluded from the automatic `Restore` sweep.
    pub needs_manual_restore: bool,
    /// Resolved by static module lookup only, attached in its own phase.
    pub needs_static_hook: bool,
    /// The real-pointer slot is exported from the header.
    pub needs_public_real: bool,
    /// False for entries in the unsupported bucket.
    pub supported: bool,
    /// Name of the entry whose packet variant and state call this one reuses.
    pub alias: Option<String>,
    pub multi_state: Option<MultiState>,
}

impl EntryPoint {
    /// Name of the emitted trampoline, `hooked_<name>`.
    pub fn hooked_name(&self) -> String {
        format!("{}{}", HOOKED_PREFIX, self.name)
    }

    /// Name of the real-function pointer slot, `gReal_<name>`.
    pub fn real_name(&self) -> String {
        format!("{}{}", REAL_PREFIX, self.name)
    }

    /// Cast spelling for assigning a raw proc address to the real pointer.
    pub fn real_cast(&self) -> String {
        format!(
            "{} ({} *)({})",
            self.return_type,
            self.calling_convention,
            self.args_decl()
        )
    }

    /// Serialization enum identifier, `EST_<name>Data`.
    pub fn enum_name(&self) -> String {
        format!("EST_{}Data", self.name)
    }

    /// Union arm / storage struct member name, `mData_<name>`.
    pub fn data_member(&self) -> String {
        format!("mData_{}", self.name)
    }

    /// The entry this hook actually records: the alias target when aliased,
    /// itself otherwise.
    pub fn call_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// True iff this entry owns a packet variant of its own.
    pub fn emits_packet(&self) -> bool {
        self.alias.is_none() && self.supported
    }

    /// True iff the generator synthesizes storage, setter, serialization and
    /// restore for this entry inside its state class.
    pub fn is_auto_state(&self) -> bool {
        self.is_state && !self.needs_manual_state && self.emits_packet()
    }

    pub fn has_pointer_args(&self) -> bool {
        self.args.iter().any(|a| a.is_pointer)
    }

    pub fn has_pointer_or_offset_args(&self) -> bool {
        self.args.iter().any(|a| a.is_pointer_or_offset)
    }

    /// `<ctype> <name>, ...`, the declaration argument list.
    pub fn args_decl(&self) -> String {
        self.args
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `<name>, ...`, the forwarding argument list.
    pub fn args_call(&self) -> String {
        self.args
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Declaration list of the state setter. Manual-state entries with a
    /// return value get the captured result prepended.
    pub fn state_args_decl(&self) -> String {
        if self.needs_manual_state && self.return_type != "void" {
            let mut parts = vec![format!("{} _retVal", self.return_type)];
            parts.extend(self.args.iter().map(|a| a.to_string()));
            parts.join(", ")
        } else {
            self.args_decl()
        }
    }

    /// Call list matching [`EntryPoint::state_args_decl`].
    pub fn state_args_call(&self) -> String {
        if self.needs_manual_state && self.return_type != "void" {
            let mut parts = vec!["retVal".to_string()];
            parts.extend(self.args.iter().map(|a| a.name.clone()));
            parts.join(", ")
        } else {
            self.args_call()
        }
    }

    /// Member list of the packet union arm. Pointer-or-offset arguments are
    /// widened with a preceding `bool isPointer_<name>` flag.
    pub fn args_data_struct(&self) -> String {
        let mut decls = Vec::new();
        for arg in &self.args {
            if arg.is_pointer_or_offset {
                decls.push(format!("bool {};", arg.pointer_or_offset_name()));
            }
            decls.push(format!("{};", arg.as_data_declaration()));
        }
        decls.join(" ")
    }

    /// Union arm declaration for the packet struct.
    pub fn serialize_struct(&self) -> String {
        format!("struct {{ {} }} {}", self.args_data_struct(), self.data_member())
    }

    /// Storage struct declaration inside the state class. Multi-state
    /// entries store one field per slot instead of their argument list.
    pub fn state_struct(&self) -> String {
        let members = match &self.multi_state {
            Some(ms) => ms.data_struct(),
            None => self.args_data_struct(),
        };
        format!("struct {{ {} }} {}", members, self.data_member())
    }

    /// `mData_<name>.<arg>, ...`, the stored argument list of this entry.
    pub fn stored_args(&self) -> String {
        self.args
            .iter()
            .map(|a| format!("{}.{}", self.data_member(), a.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `<var>.mData_<name>.<arg>, ...`, the stored argument list read from a
    /// staging packet.
    pub fn packet_args(&self, var: &str) -> String {
        self.args
            .iter()
            .map(|a| format!("{}.{}.{}", var, self.data_member(), a.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True iff the byte length of `args[arg_index]`'s buffer can be
    /// computed from the entry's other arguments.
    pub fn can_auto_determine_pointer_length(&self, arg_index: usize) -> bool {
        length::auto_length_body(self, arg_index).is_some()
    }

    /// The `return …;` statement of the inline length helper, or `None` when
    /// inference refuses and a hand-written helper is required.
    pub fn determine_pointer_length_body(&self, arg_index: usize) -> Option<String> {
        length::auto_length_body(self, arg_index)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}({})",
            self.return_type,
            self.calling_convention,
            self.name,
            self.args_decl()
        )
    }
}

/// An opaque persistent field of a state class. The field's lifecycle is
/// hand-written; the generator only declares it and an inline accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    pub name: String,
    pub ctype: String,
}

impl DataField {
    /// Declaration inside the class body. Bracketed types become an array
    /// suffix after the member name.
    pub fn as_declaration(&self) -> String {
        match self.ctype.split_once('[') {
            Some((base, dims)) => format!("{} mData_{}[{}", base, self.name, dims),
            None => format!("{} mData_{}", self.ctype, self.name),
        }
    }
}

/// A context-state class: the automatically managed current values of a
/// subset of GL state, plus hand-managed data fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateClass {
    pub name: String,
    pub members: Vec<EntryPoint>,
    pub data: Vec<DataField>,
}

/// The complete, sorted model both emitters consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    /// Every hooked entry point, sorted by name.
    pub entries: Vec<EntryPoint>,
    /// Every state class, sorted by name.
    pub state_classes: Vec<StateClass>,
}

impl Registry {
    /// Name of the class the global `gContextState` pointer refers to.
    pub fn context_state_name(&self) -> &str {
        self.state_classes
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("ContextState")
    }

    /// Runs a generator against this registry.
    pub fn write_bindings<G, W>(&self, generator: G, dest: &mut W) -> io::Result<()>
    where
        G: Generator,
        W: io::Write,
    {
        generator.write(self, dest)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::EntryDef;

    fn entry(name: &str, args: &[&str]) -> super::EntryPoint {
        EntryDef::new(name, args).into_entry_point(false, true).unwrap()
    }

    #[test]
    fn argument_type_derivations() {
        let e = entry("glDeleteTextures", &["GLsizei_n", "const_GLuint_ptr_textures"]);
        let arg = &e.args[1];
        assert_eq!(arg.ctype, "const GLuint*");
        assert!(arg.is_pointer);
        assert!(arg.is_const());
        assert_eq!(arg.underlying_type(), "const GLuint");
        assert_eq!(arg.lvalue_type(), "GLuint*");
        assert_eq!(arg.pointer_or_offset_name(), "isPointer_textures");
        assert_eq!(
            arg.length_fn("glDeleteTextures"),
            "determinePointerLength_glDeleteTextures_textures"
        );
    }

    #[test]
    fn declaration_lists() {
        let e = entry("glBindTexture", &["GLenum_target", "GLuint_texture"]);
        assert_eq!(e.args_decl(), "GLenum target, GLuint texture");
        assert_eq!(e.args_call(), "target, texture");
        assert_eq!(e.hooked_name(), "hooked_glBindTexture");
        assert_eq!(e.real_name(), "gReal_glBindTexture");
        assert_eq!(e.enum_name(), "EST_glBindTextureData");
        assert_eq!(
            e.real_cast(),
            "void (APIENTRY *)(GLenum target, GLuint texture)"
        );
    }

    #[test]
    fn manual_state_prepends_return_value() {
        let e = EntryDef::new("glGetUniformLocation", &["GLuint_program", "const_GLchar_ptr_name"])
            .manual_state()
            .returns("GLint")
            .into_entry_point(true, true)
            .unwrap();
        assert_eq!(
            e.state_args_decl(),
            "GLint _retVal, GLuint program, const GLchar* name"
        );
        assert_eq!(e.state_args_call(), "retVal, program, name");
    }

    #[test]
    fn pointer_or_offset_widens_data_struct() {
        let e = EntryDef::new(
            "glVertexPointer",
            &[
                "GLint_size",
                "GLenum_type",
                "GLsizei_stride",
                "const_GLvoid_ptr_pointer",
            ],
        )
        .pointer_or_offset("pointer")
        .into_entry_point(false, true)
        .unwrap();
        assert_eq!(
            e.args_data_struct(),
            "GLint size; GLenum type; GLsizei stride; bool isPointer_pointer; const GLvoid* pointer;"
        );
    }

    #[test]
    fn multi_state_storage_uses_slots() {
        use super::{MultiState, StateSlot};
        let ms = MultiState {
            param: "pname".to_string(),
            slots: vec![
                StateSlot::Named("GL_RED_SCALE".to_string()),
                StateSlot::Typed {
                    name: "GL_MAP_COLOR".to_string(),
                    ctype: "GLboolean".to_string(),
                },
            ],
            default_ctype: Some("GLfloat".to_string()),
        };
        assert_eq!(
            ms.data_struct(),
            "GLfloat data_GL_RED_SCALE; GLboolean data_GL_MAP_COLOR;"
        );
    }

    #[test]
    fn data_field_array_declaration() {
        let plain = super::DataField {
            name: "DrawBuffer".to_string(),
            ctype: "GLenum".to_string(),
        };
        assert_eq!(plain.as_declaration(), "GLenum mData_DrawBuffer");
        let array = super::DataField {
            name: "ClearColor".to_string(),
            ctype: "GLclampf[4]".to_string(),
        };
        assert_eq!(array.as_declaration(), "GLclampf mData_ClearColor[4]");
    }
}
