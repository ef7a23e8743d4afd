//! Pointer-length inference.
//!
//! Given an entry point and the index of one of its pointer arguments, this
//! module computes the body of an inline helper that yields the byte length
//! of the argument's buffer, as target-language source text. The rules are a
//! fixed table of `(compiled pattern, handler)` pairs evaluated in
//! declaration order; the first rule whose pattern matches the entry name
//! and whose handler accepts the entry wins.
//!
//! Two outcomes are possible besides a match: a rule can refuse inference
//! outright (the client vertex-array `*Pointer` family, whose length depends
//! on runtime state), or no rule matches at all. Both defer to a
//! hand-written `determinePointerLength_<entry>_<arg>` helper; the emitters
//! declare its prototype instead of failing generation.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::registry::EntryPoint;

enum Outcome {
    /// The full `return …;` statement of the inline helper.
    Body(String),
    /// Inference is refused; a hand-written helper is required.
    Manual,
}

struct Rule {
    pattern: Regex,
    handler: fn(&Captures, &EntryPoint, usize) -> Option<Outcome>,
}

fn sized_body(count: &str, entry: &EntryPoint, arg_index: usize) -> Outcome {
    Outcome::Body(format!(
        "return (size_t)({} * sizeof({}));",
        count,
        entry.args[arg_index].underlying_type()
    ))
}

/// `glDrawThings(GLsizei n, const GLuint* things)` and friends: the leading
/// count argument scales the element size.
fn n_counted(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    let first = entry.args.first()?;
    if first.ctype == "GLsizei" && first.name == "n" && !entry.args[arg_index].ctype.contains("void")
    {
        return Some(sized_body(&first.name, entry, arg_index));
    }
    None
}

/// Immediate-mode vector forms carry their element count in the name.
fn immediate(caps: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(&caps[2], entry, arg_index))
}

fn rect(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body("2", entry, arg_index))
}

fn raster_pos(caps: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(&caps[1], entry, arg_index))
}

fn single_value(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body("1", entry, arg_index))
}

fn matrix(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body("16", entry, arg_index))
}

fn eval_coord(caps: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(&caps[1], entry, arg_index))
}

fn gen(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    let first = entry.args.first()?;
    if first.ctype == "GLsizei" {
        return Some(sized_body(&first.name, entry, arg_index));
    }
    None
}

/// `GL_FOG_COLOR` is the only vector-valued fog pname the trace cares about;
/// everything else is stored scalar.
fn fog(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(
        &format!("({} == GL_FOG_COLOR ? 4 : 1)", entry.args[0].name),
        entry,
        arg_index,
    ))
}

fn get(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(
        &format!("GLenumToParameterCount({})", entry.args[0].name),
        entry,
        arg_index,
    ))
}

fn get_light_or_material(_: &Captures, entry: &EntryPoint, arg_index: usize) -> Option<Outcome> {
    Some(sized_body(
        &format!("GLenumToParameterCount({})", entry.args[1].name),
        entry,
        arg_index,
    ))
}

/// Client vertex-array pointers: the length depends on array state at draw
/// time, so these always take a hand-written helper.
fn client_pointer(_: &Captures, _: &EntryPoint, _: usize) -> Option<Outcome> {
    Some(Outcome::Manual)
}

macro_rules! rule {
    ($pattern:expr, $handler:expr) => {
        Rule {
            pattern: Regex::new($pattern).unwrap(),
            handler: $handler,
        }
    };
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // Unconditional on the name; the handler's argument gate decides.
        rule!(r"^", n_counted),
        rule!(r"^gl(Color|Normal|TexCoord|Vertex)(\d+)(b|d|f|i|s|ub|ui|us)v", immediate),
        rule!(r"^glRect(d|f|i|s)v", rect),
        rule!(r"^glRasterPos(\d+)(d|f|i|s)v", raster_pos),
        rule!(r"^gl(EdgeFlag|Index)(d|f|i|s|ub)?v", single_value),
        rule!(r"^gl(Load|Mult)Matrix(d|f)", matrix),
        rule!(r"^glEvalCoord(\d+)(d|f)v", eval_coord),
        rule!(r"^glGen(\w+)", gen),
        rule!(r"^glFog(f|i)v", fog),
        rule!(r"^glGet(Boolean|Double|Float|Integer)v", get),
        rule!(r"^glGet(Light|Material)(f|i)v", get_light_or_material),
        rule!(
            r"^gl(Color|EdgeFlag|Normal|TexCoord|Vertex|VertexAttrib|Index)Pointer",
            client_pointer
        ),
    ]
});

/// The `return …;` statement sizing `entry.args[arg_index]`'s buffer, or
/// `None` when no rule matches (or a rule refuses).
pub(crate) fn auto_length_body(entry: &EntryPoint, arg_index: usize) -> Option<String> {
    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(&entry.name) {
            match (rule.handler)(&caps, entry, arg_index) {
                Some(Outcome::Body(body)) => return Some(body),
                Some(Outcome::Manual) => return None,
                None => continue,
            }
        }
    }
    None
}
