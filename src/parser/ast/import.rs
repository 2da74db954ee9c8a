use crate::lexer::Span;

/// An `import` declaration, stored as its dotted path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub segments: Vec<String>,
    pub position: Span,
}

impl Import {
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::test_helpers::*;

    #[test]
    fn test_single_segment_import() {
        let program = parse_source("import std\n").unwrap();

        assert_eq!(program.imports.len(), 1);
        assert_eq!(program.imports[0].segments, vec!["std".to_string()]);
    }

    #[test]
    fn test_dotted_import() {
        let program = parse_source("import std.io.file\n").unwrap();

        assert_eq!(program.imports[0].path(), "std.io.file");
    }

    #[test]
    fn test_multiple_imports_keep_order() {
        let program = parse_source("import alpha\nimport beta\n").unwrap();

        assert_eq!(program.imports[0].path(), "alpha");
        assert_eq!(program.imports[1].path(), "beta");
    }
}
