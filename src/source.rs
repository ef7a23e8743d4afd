//! Emits `functionhooks.gen.cpp`.
//!
//! Definition side of the generated pair: the real-pointer table, hook
//! resolution and attachment, the hook bodies themselves, packet
//! serialization and replay, and the state-class definitions. Everything
//! here calls into the hand-written runtime (`FileLike`, `Checkpoint`,
//! `Once`/`TraceError`/`TraceWarn`, `SafeFree`, mhook, the platform loader)
//! by name only.

use std::io;

use crate::header::{auto_members, write_banner};
use crate::registry::{EntryPoint, Registry, StateClass, DATA_PACKET_STRUCT, REAL_PREFIX};

pub fn write<W>(registry: &Registry, command_line: &str, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    write_banner(command_line, dest)?;
    write_preamble(registry, dest)?;
    write_real_pointers(registry, dest)?;
    write_resolver(registry, dest)?;
    write_attach_hooks(registry, true, dest)?;
    write_attach_hooks(registry, false, dest)?;
    write_detach_hooks(registry, dest)?;
    write_hook_bodies(registry, dest)?;
    write_packet_read(registry, dest)?;
    write_packet_write(registry, dest)?;
    write_packet_play(registry, dest)?;
    write_packet_factories(registry, dest)?;
    for class in &registry.state_classes {
        write_state_class(class, dest)?;
    }
    writeln!(dest)
}

fn write_preamble<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "#include \"StdAfx.h\"")?;
    writeln!(dest, "#include \"functionhooks.gen.h\"")?;
    writeln!(dest, "#include \"thirdparty/mhook/mhook-lib/mhook.h\"")?;
    writeln!(dest, "#include \"extensions.h\"")?;
    writeln!(dest)?;
    writeln!(dest, "bool gIsRecording = false;")?;
    writeln!(dest, "{}* gContextState = NULL;", registry.context_state_name())?;
    writeln!(dest)
}

fn write_real_pointers<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "// Pointers to real functions")?;
    for entry in &registry.entries {
        let visibility = if entry.needs_manual_detour || entry.needs_public_real {
            ""
        } else {
            "static "
        };
        let points_to = if entry.needs_static_hook {
            entry.name.as_str()
        } else {
            "NULL"
        };
        writeln!(
            dest,
            "{}{} ({} * {})({}) = {};",
            visibility,
            entry.return_type,
            entry.calling_convention,
            entry.real_name(),
            entry.args_decl(),
            points_to
        )?;
    }
    writeln!(dest)
}

/// Resolves every non-static entry through `wglGetProcAddress`, falling back
/// to the static module lookup when the dynamic lookup returns null.
fn write_resolver<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "// Functions to resolve, attach and detach extensions we know about")?;
    writeln!(dest, "void Generated_ResolveDynamics()")?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\t// Per documentation, do not call FreeLibrary with this handle.")?;
    writeln!(dest, "\tHMODULE hOpenGL32 = GetModuleHandle(TEXT(\"opengl32.dll\"));")?;
    writeln!(dest, "\tFARPROC tmpProc = NULL;")?;
    writeln!(dest, "\t// Note: Don't care if these don't get found.")?;
    for entry in registry.entries.iter().filter(|e| !e.needs_static_hook) {
        writeln!(dest, "\ttmpProc = wglGetProcAddress(\"{}\");", entry.name)?;
        writeln!(
            dest,
            "\t{} = ({})(tmpProc ? tmpProc : GetProcAddress(hOpenGL32, \"{}\"));",
            entry.real_name(),
            entry.real_cast(),
            entry.name
        )?;
        writeln!(dest)?;
    }
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_attach_hooks<W>(registry: &Registry, statics: bool, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let fn_name = if statics {
        "Generated_AttachStaticHooks"
    } else {
        "Generated_AttachDynamicHooks"
    };
    writeln!(dest, "void {}()", fn_name)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tMhook_BeginMultiOperation(FALSE);")?;
    writeln!(dest, "\tBOOL hookSuccess = true;")?;
    for entry in registry.entries.iter().filter(|e| e.needs_static_hook == statics) {
        writeln!(dest, "\tif ({} != NULL) {{", entry.real_name())?;
        writeln!(
            dest,
            "\t\thookSuccess = Mhook_SetHook(&(PVOID&){}, {});",
            entry.real_name(),
            entry.hooked_name()
        )?;
        writeln!(dest, "\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\tMhook_EndMultiOperation();")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_detach_hooks<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void Generated_DetachAllHooks()")?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tMhook_BeginMultiOperation(FALSE);")?;
    writeln!(dest, "\tBOOL unhookSuccess = true;")?;
    for entry in &registry.entries {
        writeln!(dest, "\tif ({} != NULL) {{", entry.real_name())?;
        writeln!(
            dest,
            "\t\tunhookSuccess = Mhook_Unhook(&(PVOID&){});",
            entry.real_name()
        )?;
        writeln!(dest, "\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\tMhook_EndMultiOperation();")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_hook_bodies<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "// Hook bodies (autogenerated) -- see functionhooks.manual.cpp for hand-written hook bodies"
    )?;
    for entry in registry.entries.iter().filter(|e| !e.needs_manual_detour) {
        write_hook_body(entry, dest)?;
        writeln!(dest)?;
    }
    Ok(())
}

/// The trampoline: forward to the real call first, bail when the calling
/// thread does not own the context, then record.
fn write_hook_body<W>(entry: &EntryPoint, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    let is_void = entry.return_type == "void";
    writeln!(
        dest,
        "{} {} {}({})",
        entry.return_type,
        entry.calling_convention,
        entry.hooked_name(),
        entry.args_decl()
    )?;
    writeln!(dest, "{{")?;
    let real = format!("{}{}", REAL_PREFIX, entry.call_name());
    if is_void {
        writeln!(dest, "\t{}({});", real, entry.args_call())?;
    } else {
        writeln!(dest, "\tauto retVal = {}({});", real, entry.args_call())?;
    }
    writeln!(dest, "\tif (!gContextState->CheckOwnerThreadId())")?;
    if is_void {
        writeln!(dest, "\t\treturn;")?;
    } else {
        writeln!(dest, "\t\treturn retVal;")?;
    }
    if entry.alias.is_some() {
        writeln!(
            dest,
            "\t// NOTE: Calling aliased function, see the hook catalog for the alias definition!"
        )?;
    }
    if entry.supported {
        writeln!(dest, "\tif (gIsRecording)")?;
        writeln!(
            dest,
            "\t\t{}::{}({}).Write(&FileLike(gMessageStream));",
            DATA_PACKET_STRUCT,
            entry.call_name(),
            entry.args_call()
        )?;
        if entry.is_state {
            writeln!(
                dest,
                "\tgContextState->{}({});",
                entry.call_name(),
                entry.state_args_call()
            )?;
        }
        if !is_void {
            writeln!(dest, "\treturn retVal;")?;
        }
    } else {
        writeln!(dest, "\t// Unsupported function, Error once.")?;
        writeln!(
            dest,
            "\tOnce(TraceError(\"{} was called, but is unsupported by glTrace--please update the trace tool.\"));",
            entry.call_name()
        )?;
        if !is_void {
            writeln!(dest, "\treturn retVal;")?;
        }
    }
    writeln!(dest, "}}")
}

/// Bulk-reads the packet header, then rehydrates pointer payloads: a stored
/// length becomes a freshly allocated buffer, a zero length keeps its
/// offset-typed trailer.
fn write_packet_read<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Read(FileLike* _in)", DATA_PACKET_STRUCT)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\t_in->ReadRaw(this, sizeof(*this));")?;
    writeln!(dest)?;
    writeln!(dest, "\tswitch(mDataType)")?;
    writeln!(dest, "\t{{")?;
    for entry in registry
        .entries
        .iter()
        .filter(|e| e.emits_packet() && e.has_pointer_args())
    {
        writeln!(dest, "\t\tcase {}:", entry.enum_name())?;
        writeln!(dest, "\t\t{{")?;
        writeln!(dest, "\t\t\tsize_t toStreamSize = 0;")?;
        for arg in entry.args.iter().filter(|a| a.is_pointer) {
            writeln!(
                dest,
                "\t\t\ttoStreamSize = (size_t)({}.{});",
                entry.data_member(),
                arg.name
            )?;
            writeln!(dest, "\t\t\tif (toStreamSize != 0) {{")?;
            writeln!(dest, "\t\t\t\tvoid* newBuffer = malloc(toStreamSize);")?;
            writeln!(dest, "\t\t\t\tassert(newBuffer != 0);")?;
            writeln!(dest, "\t\t\t\t_in->ReadRaw(newBuffer, toStreamSize);")?;
            writeln!(
                dest,
                "\t\t\t\t{}.{} = ({})newBuffer;",
                entry.data_member(),
                arg.name,
                arg.ctype
            )?;
            writeln!(dest, "\t\t\t}} else {{")?;
            writeln!(
                dest,
                "\t\t\t\t_in->Read((size_t*)&{}.{});",
                entry.data_member(),
                arg.name
            )?;
            writeln!(dest, "\t\t\t}}")?;
        }
        writeln!(dest, "\t\t\tbreak;")?;
        writeln!(dest, "\t\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\t\tcase EST_Message:")?;
    writeln!(dest, "\t\t{{")?;
    writeln!(dest, "\t\t\tsize_t toStreamSize = (size_t)mData_Message.messageBody;")?;
    writeln!(dest, "\t\t\tassert(toStreamSize != 0);")?;
    writeln!(dest, "\t\t\tvoid* newBuffer = malloc(toStreamSize);")?;
    writeln!(dest, "\t\t\tassert(newBuffer != 0);")?;
    writeln!(dest, "\t\t\t_in->ReadRaw(newBuffer, toStreamSize);")?;
    writeln!(dest, "\t\t\tmData_Message.messageBody = (char*)newBuffer;")?;
    writeln!(dest, "\t\t\tbreak;")?;
    writeln!(dest, "\t\t}}")?;
    writeln!(dest)?;
    writeln!(dest, "\t\tdefault:")?;
    writeln!(dest, "\t\t\tbreak;")?;
    writeln!(dest, "\t}};")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

/// The call that computes a pointer argument's byte length on the write
/// path, reading the stored fields of the packet.
fn length_call(entry: &EntryPoint, arg_index: usize) -> String {
    let arg = &entry.args[arg_index];
    if entry.can_auto_determine_pointer_length(arg_index) {
        format!("{}({})", arg.length_fn(&entry.name), entry.stored_args())
    } else {
        format!(
            "{}(gContextState, {})",
            arg.length_fn(&entry.name),
            entry.stored_args()
        )
    }
}

/// Replaces each pointer field with its payload length, writes the fixed
/// header, then streams the payloads (or the offset trailer) behind it.
fn write_packet_write<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Write(FileLike* _out) const", DATA_PACKET_STRUCT)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\t{} tmpPkt(*this);", DATA_PACKET_STRUCT)?;
    writeln!(dest, "\ttmpPkt.mPacketId = _out->AllocatePacketId();")?;
    writeln!(dest)?;
    writeln!(dest, "\tswitch(mDataType)")?;
    writeln!(dest, "\t{{")?;
    for entry in registry
        .entries
        .iter()
        .filter(|e| e.emits_packet() && e.has_pointer_args())
    {
        writeln!(dest, "\t\tcase {}:", entry.enum_name())?;
        writeln!(dest, "\t\t{{")?;
        for (i, arg) in entry.args.iter().enumerate() {
            if !arg.is_pointer {
                continue;
            }
            writeln!(
                dest,
                "\t\t\ttmpPkt.{}.{} = ({}) {};",
                entry.data_member(),
                arg.name,
                arg.ctype,
                length_call(entry, i)
            )?;
        }
        writeln!(dest, "\t\t\t_out->WriteRaw(&tmpPkt, sizeof(tmpPkt));")?;
        for arg in entry.args.iter().filter(|a| a.is_pointer) {
            writeln!(
                dest,
                "\t\t\tif (tmpPkt.{}.{} != 0) {{",
                entry.data_member(),
                arg.name
            )?;
            writeln!(
                dest,
                "\t\t\t\t_out->WriteRaw({}.{}, (size_t) tmpPkt.{}.{});",
                entry.data_member(),
                arg.name,
                entry.data_member(),
                arg.name
            )?;
            writeln!(dest, "\t\t\t}} else {{")?;
            writeln!(
                dest,
                "\t\t\t\t_out->Write((size_t){}.{});",
                entry.data_member(),
                arg.name
            )?;
            writeln!(dest, "\t\t\t}}")?;
        }
        writeln!(dest, "\t\t\tbreak;")?;
        writeln!(dest, "\t\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\t\tcase EST_Message:")?;
    writeln!(dest, "\t\t{{")?;
    writeln!(
        dest,
        "\t\t\ttmpPkt.mData_Message.messageBody = (char*)(strlen(mData_Message.messageBody) + 1);"
    )?;
    writeln!(dest, "\t\t\t_out->WriteRaw(&tmpPkt, sizeof(tmpPkt));")?;
    writeln!(
        dest,
        "\t\t\t_out->WriteRaw(mData_Message.messageBody, (size_t)tmpPkt.mData_Message.messageBody);"
    )?;
    writeln!(dest, "\t\t\tbreak;")?;
    writeln!(dest, "\t\t}}")?;
    writeln!(dest, "\t\tdefault:")?;
    writeln!(dest, "\t\t\t// Writes out tmpPkt because it has a packet id for debugging")?;
    writeln!(dest, "\t\t\t_out->WriteRaw(&tmpPkt, sizeof(tmpPkt));")?;
    writeln!(dest, "\t\t\tbreak;")?;
    writeln!(dest, "\t}};")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_packet_play<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Play() const", DATA_PACKET_STRUCT)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tswitch (mDataType)")?;
    writeln!(dest, "\t{{")?;
    for entry in registry.entries.iter().filter(|e| e.emits_packet()) {
        let apple = entry.name.contains("APPLE");
        writeln!(dest, "\t\tcase {}:", entry.enum_name())?;
        writeln!(dest, "\t\t{{")?;
        if apple {
            writeln!(dest, "\t\t#ifdef _APPLE")?;
        }
        if entry.needs_manual_replay {
            writeln!(dest, "\t\t\tManualPlay_{}({});", entry.name, entry.stored_args())?;
        } else {
            writeln!(dest, "\t\t\t::{}({});", entry.name, entry.stored_args())?;
        }
        if apple {
            writeln!(dest, "\t\t#endif /* _APPLE */")?;
        }
        writeln!(dest, "\t\t\t// CHECK_GL_ERROR();")?;
        writeln!(dest, "\t\t\tbreak;")?;
        writeln!(dest, "\t\t}}")?;
    }
    writeln!(dest, "\t\tdefault:")?;
    writeln!(dest, "\t\t\tbreak;")?;
    writeln!(dest, "\t}}")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_packet_factories<W>(registry: &Registry, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    for entry in registry.entries.iter().filter(|e| e.emits_packet()) {
        writeln!(
            dest,
            "{} {}::{}({})",
            DATA_PACKET_STRUCT,
            DATA_PACKET_STRUCT,
            entry.name,
            entry.args_decl()
        )?;
        writeln!(dest, "{{")?;
        writeln!(dest, "\t{} retVal;", DATA_PACKET_STRUCT)?;
        writeln!(dest, "\tmemset(&retVal, 0, sizeof(retVal));")?;
        writeln!(dest, "\tretVal.mDataType = {};", entry.enum_name())?;
        for arg in &entry.args {
            writeln!(
                dest,
                "\tretVal.{}.{} = {};",
                entry.data_member(),
                arg.name,
                arg.name
            )?;
        }
        writeln!(dest, "\treturn retVal;")?;
        writeln!(dest, "}}")?;
        writeln!(dest)?;
    }
    Ok(())
}

fn write_state_class<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    write_state_lifecycle(class, dest)?;
    write_state_write(class, dest)?;
    write_state_read(class, dest)?;
    write_state_restore(class, dest)?;
    for member in auto_members(class) {
        write_state_setter(class, member, dest)?;
    }
    Ok(())
}

/// Zero-initializes the POD prefix. The memset stops at the first
/// hand-managed data field, whose construction is delegated.
fn write_state_lifecycle<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "{}::{}()", class.name, class.name)?;
    writeln!(dest, "{{")?;
    match class.data.first() {
        None => writeln!(dest, "\tmemset(this, 0, sizeof(*this));")?,
        Some(first) => {
            writeln!(
                dest,
                "\tmemset(this, 0, offsetof({}, mData_{}));",
                class.name, first.name
            )?;
            writeln!(dest, "\tManualConstruct();")?;
        }
    }
    writeln!(dest, "}}")?;
    writeln!(dest)?;
    if class.data.is_empty() {
        writeln!(dest, "{}::~{}() {{ }}", class.name, class.name)?;
    } else {
        writeln!(dest, "{}::~{}()", class.name, class.name)?;
        writeln!(dest, "{{")?;
        writeln!(dest, "\tManualDestruct();")?;
        writeln!(dest, "}}")?;
    }
    writeln!(dest)
}

fn write_state_write<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Write(FileLike* _out) const", class.name)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\t_out->Write(Checkpoint(\"CurrentStateBegin\"));")?;
    for member in auto_members(class) {
        writeln!(dest, "\t_out->Write(mHasSet_{});", member.name)?;
        writeln!(dest, "\tif (mHasSet_{})", member.name)?;
        writeln!(
            dest,
            "\t\t{}::{}({}).Write(_out);",
            DATA_PACKET_STRUCT,
            member.name,
            member.stored_args()
        )?;
        writeln!(dest)?;
    }
    writeln!(dest, "\t_out->Write(Checkpoint(\"CurrentStateEnd\"));")?;
    writeln!(dest)?;
    writeln!(dest, "\tManualWrite(_out);")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

/// Reads each has-been-set flag and, when set, stages a packet and feeds its
/// fields back through the state setter.
fn write_state_read<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Read(FileLike* _in)", class.name)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\t_in->Read(Checkpoint(\"CurrentStateBegin\"));")?;
    writeln!(dest, "\tbool needToReceiveState = 0;")?;
    writeln!(dest, "\t{} pkt;", DATA_PACKET_STRUCT)?;
    for member in auto_members(class) {
        writeln!(dest, "\t_in->Read(&needToReceiveState);")?;
        writeln!(dest, "\tif (needToReceiveState) {{")?;
        writeln!(dest, "\t\t_in->Read(&pkt);")?;
        writeln!(dest, "\t\tassert(pkt.mDataType == {});", member.enum_name())?;
        writeln!(dest, "\t\t{}({});", member.name, member.packet_args("pkt"))?;
        writeln!(dest, "\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\t_in->Read(Checkpoint(\"CurrentStateEnd\"));")?;
    writeln!(dest, "\tManualRead(_in);")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

fn write_state_restore<W>(class: &StateClass, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(dest, "void {}::Restore()", class.name)?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tCHECK_GL_ERROR();")?;
    writeln!(dest, "\tManualPreRestore();")?;
    for member in auto_members(class).filter(|m| !m.needs_manual_restore) {
        let apple = member.name.contains("APPLE");
        writeln!(dest, "\tif (mHasSet_{}) {{", member.name)?;
        if apple {
            writeln!(dest, "\t\t#ifdef _APPLE")?;
        }
        writeln!(dest, "\t\t::{}({});", member.name, member.stored_args())?;
        if apple {
            writeln!(dest, "\t\t#endif /* _APPLE */")?;
        }
        writeln!(dest, "\t\tCHECK_GL_ERROR();")?;
        writeln!(dest, "\t}}")?;
        writeln!(dest)?;
    }
    writeln!(dest, "\tManualRestore();")?;
    writeln!(dest, "}}")?;
    writeln!(dest)
}

/// The synthesized setter: scalars are copied, pointer payloads are cloned
/// into owned buffers, pointer-or-offset scalars are kept with their flag
/// cleared.
fn write_state_setter<W>(class: &StateClass, member: &EntryPoint, dest: &mut W) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        dest,
        "void {}::{}({})",
        class.name,
        member.name,
        member.args_decl()
    )?;
    writeln!(dest, "{{")?;
    writeln!(dest, "\tmHasSet_{} = true;", member.name)?;
    let data = member.data_member();
    for (i, arg) in member.args.iter().enumerate() {
        if !arg.is_pointer {
            writeln!(dest, "\t{}.{} = {};", data, arg.name, arg.name)?;
            continue;
        }
        if arg.is_pointer_or_offset {
            writeln!(dest, "\tif ({}.{}) {{", data, arg.pointer_or_offset_name())?;
            writeln!(dest, "\t\tSafeFree({}.{});", data, arg.name)?;
            writeln!(dest, "\t}}")?;
        } else {
            writeln!(dest, "\tSafeFree({}.{});", data, arg.name)?;
        }
        if member.can_auto_determine_pointer_length(i) {
            writeln!(
                dest,
                "\tsize_t ptrSize_{} = {}({});",
                arg.name,
                arg.length_fn(&member.name),
                member.args_call()
            )?;
        } else {
            writeln!(
                dest,
                "\tsize_t ptrSize_{} = {}(this, {});",
                arg.name,
                arg.length_fn(&member.name),
                member.args_call()
            )?;
        }
        writeln!(dest, "\tif (ptrSize_{}) {{", arg.name)?;
        writeln!(
            dest,
            "\t\t{}.{} = ({})malloc(ptrSize_{});",
            data, arg.name, arg.ctype, arg.name
        )?;
        if arg.is_const() {
            writeln!(
                dest,
                "\t\t// This is only apparently const to the outside world. We're gonna trounce on it, though."
            )?;
            writeln!(
                dest,
                "\t\tmemcpy(const_cast<{}>({}.{}), {}, ptrSize_{});",
                arg.lvalue_type(),
                data,
                arg.name,
                arg.name,
                arg.name
            )?;
        } else {
            writeln!(
                dest,
                "\t\tmemcpy({}.{}, {}, ptrSize_{});",
                data, arg.name, arg.name, arg.name
            )?;
        }
        if arg.is_pointer_or_offset {
            writeln!(dest, "\t\t{}.{} = true;", data, arg.pointer_or_offset_name())?;
        }
        writeln!(dest, "\t}} else {{")?;
        if arg.is_pointer_or_offset {
            writeln!(dest, "\t\t{}.{} = {};", data, arg.name, arg.name)?;
            writeln!(dest, "\t\t{}.{} = false;", data, arg.pointer_or_offset_name())?;
        } else {
            writeln!(
                dest,
                "\t\tOnce(TraceWarn(\"Unable to determine pointer length for argument {} in method {}. Probably a trace bug.\"));",
                arg.name, member.name
            )?;
        }
        writeln!(dest, "\t}}")?;
    }
    writeln!(dest, "}}")?;
    writeln!(dest)
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Bin, Catalog, ClassDef, EntryDef};
    use crate::registry::Registry;

    fn fixture() -> Registry {
        Catalog {
            global_state: Bin::default().class(
                ClassDef::new("ContextState")
                    .data("OwnerThread", "DWORD")
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
                        "glDeleteTextures",
                        &["GLsizei_n", "const_GLuint_ptr_textures"],
                    ))
                    .entry(
                        EntryDef::new(
                            "glVertexAttribData",
                            &["GLuint_index", "const_GLvoid_ptr_pointer"],
                        )
                        .pointer_or_offset("pointer"),
                    )
                    .entry(
                        EntryDef::new("glAttachShader", &["GLuint_program", "GLuint_shader"])
                            .manual_state(),
                    )
                    .entry(
                        EntryDef::new("glAttachObjectARB", &["GLhandleARB_a", "GLhandleARB_b"])
                            .alias("glAttachShader"),
                    ),
            ),
            actions: Bin::of(vec![
                EntryDef::new("glGenFencesAPPLE", &["GLsizei_a", "GLuint_ptr_b"]),
                EntryDef::new("SwapBuffers", &["HDC_hdc"])
                    .returns("BOOL")
                    .manual_detour()
                    .manual_replay()
                    .static_hook(),
            ]),
            unsupported: Bin::of(vec![EntryDef::new("glBegin", &["GLenum_mode"])]),
        }
        .into_registry()
        .unwrap()
    }

    fn emit() -> String {
        let mut out = Vec::new();
        super::write(&fixture(), "codegen", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn manual_state_hook_forwards_records_and_updates_state() {
        let cpp = emit();
        let body_start = cpp.find("void APIENTRY hooked_glBindTexture").unwrap();
        let body = &cpp[body_start..cpp[body_start..].find("\n}\n").unwrap() + body_start];
        assert!(body.contains("gReal_glBindTexture(target, texture);"));
        assert!(body.contains("if (!gContextState->CheckOwnerThreadId())"));
        assert!(body.contains(
            "SSerializeDataPacket::glBindTexture(target, texture).Write(&FileLike(gMessageStream));"
        ));
        assert!(body.contains("gContextState->glBindTexture(target, texture);"));
    }

    #[test]
    fn aliased_hook_calls_target_real_packet_and_state() {
        let cpp = emit();
        let body_start = cpp.find("void APIENTRY hooked_glAttachObjectARB").unwrap();
        let body = &cpp[body_start..cpp[body_start..].find("\n}\n").unwrap() + body_start];
        assert!(body.contains("gReal_glAttachShader(a, b);"));
        assert!(body.contains("SSerializeDataPacket::glAttachShader(a, b).Write"));
        // A state-touching alias forwards into the target's state setter.
        assert!(body.contains("gContextState->glAttachShader(a, b);"));
        // The alias still owns its own real-pointer slot and resolution.
        assert!(cpp.contains(
            "static void (APIENTRY * gReal_glAttachObjectARB)(GLhandleARB a, GLhandleARB b) = NULL;"
        ));
        assert!(cpp.contains("tmpProc = wglGetProcAddress(\"glAttachObjectARB\");"));
    }

    #[test]
    fn unsupported_hook_traces_once_and_records_nothing() {
        let cpp = emit();
        let body_start = cpp.find("void APIENTRY hooked_glBegin").unwrap();
        let body = &cpp[body_start..cpp[body_start..].find("\n}\n").unwrap() + body_start];
        assert!(body.contains(
            "Once(TraceError(\"glBegin was called, but is unsupported by glTrace--please update the trace tool.\"));"
        ));
        assert!(!body.contains("gIsRecording"));
        assert!(!body.contains("gContextState->glBegin"));
    }

    #[test]
    fn manual_detour_gets_no_generated_body() {
        let cpp = emit();
        assert!(!cpp.contains("BOOL APIENTRY hooked_SwapBuffers(HDC hdc)\n{"));
        // But it is still attached, statically, and its pointer is public.
        assert!(cpp.contains("BOOL (APIENTRY * gReal_SwapBuffers)(HDC hdc) = SwapBuffers;"));
        let attach_static = cpp
            .split("void Generated_AttachStaticHooks()")
            .nth(1)
            .unwrap()
            .split("void Generated_AttachDynamicHooks()")
            .next()
            .unwrap();
        assert!(attach_static.contains("Mhook_SetHook(&(PVOID&)gReal_SwapBuffers, hooked_SwapBuffers);"));
    }

    #[test]
    fn static_hooks_skip_dynamic_resolution() {
        let cpp = emit();
        assert!(!cpp.contains("wglGetProcAddress(\"SwapBuffers\")"));
        let attach_dynamic = cpp
            .split("void Generated_AttachDynamicHooks()")
            .nth(1)
            .unwrap()
            .split("void Generated_DetachAllHooks()")
            .next()
            .unwrap();
        assert!(!attach_dynamic.contains("gReal_SwapBuffers"));
    }

    #[test]
    fn packet_write_sizes_pointer_payloads() {
        let cpp = emit();
        assert!(cpp.contains(
            "tmpPkt.mData_glDeleteTextures.textures = (const GLuint*) determinePointerLength_glDeleteTextures_textures(mData_glDeleteTextures.n, mData_glDeleteTextures.textures);"
        ));
        assert!(cpp.contains(
            "_out->WriteRaw(mData_glDeleteTextures.textures, (size_t) tmpPkt.mData_glDeleteTextures.textures);"
        ));
    }

    #[test]
    fn packet_write_uses_context_helper_when_inference_refused() {
        let cpp = emit();
        assert!(cpp.contains(
            "tmpPkt.mData_glVertexAttribData.pointer = (const GLvoid*) determinePointerLength_glVertexAttribData_pointer(gContextState, mData_glVertexAttribData.index, mData_glVertexAttribData.pointer);"
        ));
    }

    #[test]
    fn play_wraps_apple_entries_and_dispatches_manual_replay() {
        let cpp = emit();
        let play = cpp
            .split("void SSerializeDataPacket::Play() const")
            .nth(1)
            .unwrap();
        let case_start = play.find("case EST_glGenFencesAPPLEData:").unwrap();
        let case_body = &play[case_start..play[case_start..].find("break;").unwrap() + case_start];
        assert!(case_body.contains("#ifdef _APPLE"));
        assert!(case_body.contains("::glGenFencesAPPLE(mData_glGenFencesAPPLE.a, mData_glGenFencesAPPLE.b);"));
        assert!(case_body.contains("#endif /* _APPLE */"));
        assert!(play.contains("ManualPlay_glBindTexture(mData_glBindTexture.target, mData_glBindTexture.texture);"));
    }

    #[test]
    fn state_constructor_stops_memset_at_manual_data() {
        let cpp = emit();
        assert!(cpp.contains("memset(this, 0, offsetof(ContextState, mData_OwnerThread));"));
        assert!(cpp.contains("\tManualConstruct();"));
        assert!(cpp.contains("\tManualDestruct();"));
    }

    #[test]
    fn restore_replays_set_state_with_error_checks() {
        let cpp = emit();
        let restore = cpp.split("void ContextState::Restore()").nth(1).unwrap();
        assert!(restore.contains("if (mHasSet_glClearColor) {"));
        assert!(restore.contains(
            "::glClearColor(mData_glClearColor.red, mData_glClearColor.green, mData_glClearColor.blue, mData_glClearColor.alpha);"
        ));
        assert!(restore.contains("CHECK_GL_ERROR();"));
        // The manual-state member is not auto-restored.
        assert!(!restore.contains("::glBindTexture"));
    }

    #[test]
    fn setter_clones_pointer_payloads() {
        let cpp = emit();
        let setter = cpp
            .split("void ContextState::glDeleteTextures(GLsizei n, const GLuint* textures)")
            .nth(1)
            .unwrap();
        assert!(setter.contains("mHasSet_glDeleteTextures = true;"));
        assert!(setter.contains("SafeFree(mData_glDeleteTextures.textures);"));
        assert!(setter.contains(
            "size_t ptrSize_textures = determinePointerLength_glDeleteTextures_textures(n, textures);"
        ));
        assert!(setter.contains("mData_glDeleteTextures.textures = (const GLuint*)malloc(ptrSize_textures);"));
        assert!(setter.contains("memcpy(const_cast<GLuint*>(mData_glDeleteTextures.textures), textures, ptrSize_textures);"));
    }

    #[test]
    fn setter_keeps_offsets_and_clears_flag() {
        let cpp = emit();
        let setter = cpp
            .split("void ContextState::glVertexAttribData(GLuint index, const GLvoid* pointer)")
            .nth(1)
            .unwrap();
        assert!(setter.contains("if (mData_glVertexAttribData.isPointer_pointer) {"));
        assert!(setter.contains("mData_glVertexAttribData.pointer = pointer;"));
        assert!(setter.contains("mData_glVertexAttribData.isPointer_pointer = false;"));
        assert!(setter.contains("mData_glVertexAttribData.isPointer_pointer = true;"));
    }

    #[test]
    fn state_write_and_read_roundtrip_flags() {
        let cpp = emit();
        let write = cpp
            .split("void ContextState::Write(FileLike* _out) const")
            .nth(1)
            .unwrap()
            .split("void ContextState::Read(FileLike* _in)")
            .next()
            .unwrap();
        assert!(write.contains("_out->Write(Checkpoint(\"CurrentStateBegin\"));"));
        assert!(write.contains("_out->Write(mHasSet_glClearColor);"));
        assert!(write.contains(
            "SSerializeDataPacket::glClearColor(mData_glClearColor.red, mData_glClearColor.green, mData_glClearColor.blue, mData_glClearColor.alpha).Write(_out);"
        ));
        let read = cpp.split("void ContextState::Read(FileLike* _in)").nth(1).unwrap();
        assert!(read.contains("assert(pkt.mDataType == EST_glClearColorData);"));
        assert!(read.contains(
            "glClearColor(pkt.mData_glClearColor.red, pkt.mData_glClearColor.green, pkt.mData_glClearColor.blue, pkt.mData_glClearColor.alpha);"
        ));
        assert!(read.contains("ManualRead(_in);"));
    }
}
