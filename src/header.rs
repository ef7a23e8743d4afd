//! Emits `functionhooks.gen.h`.
//!
//! Declaration side of the generated pair: real-pointer externs, hook
//! prototypes, the serialization enum, the packet struct, pointer-length
//! helpers and the state-class declarations. The section order is fixed and
//! the registry is already sorted, so output is deterministic.

use std::io;

use crate::registry::{EntryPoint, Registry, StateClass, DATA_PACKET_STRUCT};

pub fn write<W>(registry: &Registry, command_line: &str, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    write_banner(command_line, dest)?;
    write_preamble(registry, dest)?;
    write_orchestration(dest)?;
    write_hook_declarations(registry, dest)?;
    write_serialize_enum(registry, dest)?;
    write_packet_struct(registry, dest)?;
    write_manual_play_declarations(registry, dest)?;
    write_length_helpers(registry, dest)?;
    for class in &registry.state_classes {
        write_state_class(class, dest)?;
    }
    writeln!(dest)
}

pub fn write_banner<W>(command_line: &str, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "// This file was automatically generated, do not modify. To regenerate, run:"
    )?;
    writeln!(dest, "// {}", command_line)?;
    writeln!(dest)
}

/// Fixed include set plus the recording globals and the real-pointer externs
/// that hand-written code needs to see.
fn write_preamble<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "#pragma once")?;
    writeln!(dest, "#include <map>")?;
    writeln!(dest, "#include \"functionhooks.manual.h\"")?;
    writeln!(dest)?;
    writeln!(dest, "extern bool gIsRecording;")?;
    writeln!(
        dest,
        "extern class {}* gContextState;",
        registry.context_state_name()
    )?;
    for entry in &registry.entries {
        if entry.needs_manual_detour || entry.needs_public_real {
            writeln!(
                dest,
                "extern {} ({} * {})({});",
                entry.return_type,
                entry.calling_convention,
                entry.real_name(),
                entry.args_decl()
            )?;
        }
    }
    writeln!(dest)
}

fn write_orchestration<W>(dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void Generated_ResolveDynamics();")?;
    writeln!(dest, "void Generated_AttachStaticHooks();")?;
    writeln!(dest, "void Generated_AttachDynamicHooks();")?;
    writeln!(dest, "void Generated_DetachAllHooks();")?;
    writeln!(dest, "size_t GLenumToParameterCount(GLenum pname);")?;
    writeln!(dest)
}

fn write_hook_declarations<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    for entry in &registry.entries {
        writeln!(
            dest,
            "{} {} {}({});",
            entry.return_type,
            entry.calling_convention,
            entry.hooked_name(),
            entry.args_decl()
        )?;
    }
    writeln!(dest)
}

/// One `EST_<name>Data` per non-aliased supported entry, in sorted order,
/// then the message and sentinel values and the width-forcing maximum.
fn write_serialize_enum<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "// Serialization Enumeration")?;
    writeln!(dest, "enum ESerializeTypes {{")?;
    for entry in registry.entries.iter().filter(|e| e.emits_packet()) {
        writeln!(dest, "\t{},", entry.enum_name())?;
    }
    writeln!(dest, "\tEST_Message,")?;
    writeln!(dest, "\tEST_Sentinel,")?;
    writeln!(dest)?;
    writeln!(dest, "\tEST_ForceSize = 0x7FFFFFFF")?;
    writeln!(dest, "}};")?;
    writeln!(dest)
}

fn write_packet_struct<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "struct {}", DATA_PACKET_STRUCT)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tvoid Read(FileLike* _in);")?;
    writeln!(dest, "\tvoid Write(FileLike* _out) const;")?;
    writeln!(dest, "\tvoid Play() const;")?;
    writeln!(dest)?;
    writeln!(dest, "\tESerializeTypes mDataType;")?;
    writeln!(dest, "\tsize_t mPacketId;")?;
    writeln!(dest, "\tunion {{")?;
    for entry in registry.entries.iter().filter(|e| e.emits_packet()) {
        writeln!(dest, "\t\t{};", entry.serialize_struct())?;
    }
    writeln!(dest, "\t\tstruct {{ int level; char* messageBody; }} mData_Message;")?;
    writeln!(dest, "\t}};")?;
    writeln!(dest)?;
    for entry in registry.entries.iter().filter(|e| e.emits_packet()) {
        writeln!(
            dest,
            "\tstatic {} {}({});",
            DATA_PACKET_STRUCT,
            entry.name,
            entry.args_decl()
        )?;
    }
    writeln!(dest)?;
    writeln!(dest, "}};")?;
    writeln!(dest)
}

fn write_manual_play_declarations<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    for entry in &registry.entries {
        if entry.needs_manual_replay {
            writeln!(dest, "void ManualPlay_{}({});", entry.name, entry.args_decl())?;
        }
    }
    writeln!(dest)
}

/// One helper per pointer argument: an `inline` body with a null guard when
/// inference succeeded, a prototype taking the state context otherwise.
fn write_length_helpers<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "// determining pointer length for parameters")?;
    for entry in &registry.entries {
        for (i, arg) in entry.args.iter().enumerate() {
            if !arg.is_pointer {
                continue;
            }
            match entry.determine_pointer_length_body(i) {
                Some(body) => writeln!(
                    dest,
                    "inline size_t {}({}) {{ if (!{}) return 0; {} }}",
                    arg.length_fn(&entry.name),
                    entry.args_decl(),
                    arg.name,
                    body
                )?,
                None => writeln!(
                    dest,
                    "       size_t {}(const {}* _ctxState, {});",
                    arg.length_fn(&entry.name),
                    registry.context_state_name(),
                    entry.args_decl()
                )?,
            }
        }
    }
    writeln!(dest)
}

fn write_state_class<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "class {}", class.name)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "public:")?;
    writeln!(dest, "\t{}();", class.name)?;
    writeln!(dest, "\t~{}();", class.name)?;
    writeln!(dest, "\tvoid Read(FileLike* _in);")?;
    writeln!(dest, "\tvoid Write(FileLike* _out) const;")?;
    writeln!(dest, "\tvoid OnCaptureStart();")?;
    writeln!(dest, "\tvoid Restore();")?;
    writeln!(dest, "\tvoid SetOwnerThreadId(DWORD _threadId);")?;
    writeln!(dest, "\tbool CheckOwnerThreadId() const;")?;
    writeln!(dest)?;
    for member in class.members.iter().filter(|m| m.emits_packet()) {
        if member.needs_manual_state {
            writeln!(
                dest,
                "\t{} {}({});",
                member.return_type,
                member.name,
                member.state_args_decl()
            )?;
        } else {
            writeln!(dest, "\tvoid {}({});", member.name, member.state_args_decl())?;
        }
    }
    writeln!(dest)?;
    for field in &class.data {
        writeln!(
            dest,
            "\tinline const {} Get{}() const {{ return mData_{}; }}",
            field.ctype, field.name, field.name
        )?;
    }
    writeln!(dest)?;
    writeln!(dest, "private:")?;
    writeln!(dest, "\tvoid ManualConstruct(); // Construct any manual data members")?;
    writeln!(dest, "\tvoid ManualDestruct(); // Destroy any manual data members")?;
    writeln!(dest, "\tvoid ManualWrite(FileLike* _out) const;")?;
    writeln!(dest, "\tvoid ManualRead(FileLike* _in);")?;
    writeln!(dest, "\tvoid ManualPreRestore();")?;
    writeln!(dest, "\tvoid ManualRestore();")?;
    writeln!(dest)?;
    for member in auto_members(class) {
        writeln!(dest, "\t{};", member.state_struct())?;
    }
    for member in auto_members(class) {
        writeln!(dest, "\tbool mHasSet_{};", member.name)?;
    }
    writeln!(dest)?;
    for field in &class.data {
        writeln!(dest, "\t{};", field.as_declaration())?;
    }
    writeln!(dest, "\t// For data reconstruction")?;
    writeln!(dest, "\tfriend class GLTrace;")?;
    writeln!(dest, "}};")?;
    writeln!(dest)
}

/// Members the generator owns storage and serialization for.
pub(crate) fn auto_members(class: &StateClass) -> impl Iterator<Item = &EntryPoint> {
    class.members.iter().filter(|m| m.is_auto_state())
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Bin, Catalog, ClassDef, EntryDef};
    use crate::registry::Registry;

    fn fixture() -> Registry {
        Catalog {
            global_state: Bin::default().class(
                ClassDef::new("ContextState")
                    .data("DrawBuffer", "GLenum")
                    .entry(
                        EntryDef::new("glBindTexture", &["GLenum_target", "GLuint_texture"])
                            .manual_state()
                            .manual_replay(),
                    )
                    .entry(EntryDef::new(
                        "glClearColor",
                        &[
                            "GLclampf_red",
                            "GLclampf_green",
                            "GLclampf_blue",
                            "GLclampf_alpha",
                        ],
                    ))
                    .entry(EntryDef::new(
                        "glGenTextures",
                        &["GLsizei_n", "GLuint_ptr_textures"],
                    )),
            ),
            actions: Bin::of(vec![
                EntryDef::new(
                    "glVertexPointer",
                    &[
                        "GLint_size",
                        "GLenum_type",
                        "GLsizei_stride",
                        "const_GLvoid_ptr_pointer",
                    ],
                )
                .pointer_or_offset("pointer"),
                EntryDef::new("glAttachObjectARB", &["GLhandleARB_a", "GLhandleARB_b"])
                    .alias("glAttachShader"),
            ]),
            unsupported: Bin::of(vec![EntryDef::new("glBegin", &["GLenum_mode"])]),
        }
        .into_registry()
        .unwrap()
    }

    fn emit() -> String {
        let mut out = Vec::new();
        super::write(&fixture(), "codegen --out-dir .", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn banner_echoes_command_line() {
        let header = emit();
        assert!(header.starts_with(
            "// This file was automatically generated, do not modify. To regenerate, run:\n// codegen --out-dir .\n"
        ));
    }

    #[test]
    fn manual_state_member_gets_prototype_only() {
        let header = emit();
        assert!(header.contains("void hooked_glBindTexture(GLenum target, GLuint texture);"));
        assert!(header.contains("\tvoid glBindTexture(GLenum target, GLuint texture);"));
        // No generated storage for a manual-state member.
        assert!(!header.contains("mData_glBindTexture"));
        assert!(!header.contains("mHasSet_glBindTexture"));
    }

    #[test]
    fn automatic_member_gets_storage_and_flag() {
        let header = emit();
        assert!(header.contains(
            "\tstruct { GLclampf red; GLclampf green; GLclampf blue; GLclampf alpha; } mData_glClearColor;"
        ));
        assert!(header.contains("\tbool mHasSet_glClearColor;"));
    }

    #[test]
    fn aliased_and_unsupported_entries_get_no_enum_value() {
        let header = emit();
        assert!(!header.contains("EST_glAttachObjectARBData"));
        assert!(!header.contains("EST_glBeginData"));
        assert!(header.contains("EST_glClearColorData,"));
        assert!(header.contains("\tEST_ForceSize = 0x7FFFFFFF"));
        // Still hooked and still resolvable.
        assert!(header
            .contains("void APIENTRY hooked_glAttachObjectARB(GLhandleARB a, GLhandleARB b);"));
        assert!(header.contains("void APIENTRY hooked_glBegin(GLenum mode);"));
    }

    #[test]
    fn inferred_length_helper_is_inline_with_null_guard() {
        let header = emit();
        assert!(header.contains(
            "inline size_t determinePointerLength_glGenTextures_textures(GLsizei n, GLuint* textures) { if (!textures) return 0; return (size_t)(n * sizeof(GLuint)); }"
        ));
    }

    #[test]
    fn refused_length_helper_is_external_prototype() {
        let header = emit();
        assert!(header.contains(
            "size_t determinePointerLength_glVertexPointer_pointer(const ContextState* _ctxState, GLint size, GLenum type, GLsizei stride, const GLvoid* pointer);"
        ));
        assert!(!header.contains("inline size_t determinePointerLength_glVertexPointer_pointer"));
    }

    #[test]
    fn data_fields_get_accessors() {
        let header = emit();
        assert!(header.contains("\tinline const GLenum GetDrawBuffer() const { return mData_DrawBuffer; }"));
        assert!(header.contains("\tGLenum mData_DrawBuffer;"));
    }

    #[test]
    fn pointer_or_offset_union_arm_carries_flag() {
        let header = emit();
        assert!(header.contains(
            "\t\tstruct { GLint size; GLenum type; GLsizei stride; bool isPointer_pointer; const GLvoid* pointer; } mData_glVertexPointer;"
        ));
    }

    #[test]
    fn ends_with_trailing_newline() {
        assert!(emit().ends_with('\n'));
    }
}
