//! Logical-line handling for field directives.
//!
//! A directive may span several physical lines; continuation lines are
//! joined into one logical line before the `:directive: value` split is
//! attempted. Also home to the descriptive-type consolidation that turns
//! `"int or None"` style prose into a canonical type expression.

/// A fully parsed directive occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The joined logical line the directive was read from.
    pub line: String,
    /// Index of the last physical line consumed; the driver resumes one
    /// past it.
    pub next_index: usize,
    /// Whitespace-separated tokens of the directive clause,
    /// e.g. `["param", "x"]` or `["type", "str", "x"]`.
    pub parts: Vec<String>,
    /// Trailing value, trimmed.
    pub value: String,
}

/// Outcome of reading one directive occurrence: either a fully parsed
/// directive, or a failure that still tells the driver where to resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDirective {
    Parsed(Directive),
    Failed { line: String, next_index: usize },
}

/// Join a directive spanning multiple physical lines into one logical line.
///
/// Starting at `start_index`, concatenates the left-stripped opening line
/// with every immediately following line that does not begin with `:`,
/// single-space separated. Returns the joined line and the index of the
/// last line consumed. An out-of-bounds start returns an empty line and
/// the index unchanged.
pub fn join_continuation_lines(lines: &[&str], start_index: usize) -> (String, usize) {
    if start_index >= lines.len() {
        return (String::new(), start_index);
    }

    let mut block = vec![lines[start_index].trim_start()];

    let mut curr_line_index = start_index + 1;
    while curr_line_index < lines.len() && !lines[curr_line_index].starts_with(':') {
        block.push(lines[curr_line_index].trim_start());
        curr_line_index += 1;
    }

    (
        block.join(" ").trim_end_matches('\n').to_string(),
        curr_line_index - 1,
    )
}

/// Read one directive occurrence starting at `start_index`.
///
/// The logical line must split on `:` into at least three parts
/// (prefix, directive clause, value); anything else is a failure.
pub fn parse_directive(lines: &[&str], start_index: usize) -> ParsedDirective {
    let (line, next_index) = join_continuation_lines(lines, start_index);

    let pieces: Vec<&str> = line.splitn(3, ':').collect();
    let [_, clause, value] = pieces.as_slice() else {
        return ParsedDirective::Failed { line, next_index };
    };

    let parts = clause.split_whitespace().map(str::to_string).collect();
    let value = value.trim().to_string();
    ParsedDirective::Parsed(Directive {
        line,
        next_index,
        parts,
        value,
    })
}

/// Rewrite an `" or "`-joined type description as a canonical expression.
///
/// `"x or None"` / `"None or x"` become `"Optional[x]"`, any other
/// multi-segment description becomes `"Union[...]"`, and a single segment
/// passes through unchanged. Purely textual; segment names are not
/// validated.
pub fn consolidate_descriptive_type(descriptive_type: &str) -> String {
    let types: Vec<&str> = descriptive_type.split(" or ").collect();
    if types.len() == 1 {
        return descriptive_type.to_string();
    }

    let types: Vec<&str> = types.iter().map(|part| part.trim()).collect();
    if let [first, second] = types.as_slice() {
        if *first == "None" {
            return format!("Optional[{second}]");
        }
        if *second == "None" {
            return format!("Optional[{first}]");
        }
    }
    format!("Union[{}]", types.join(","))
}
