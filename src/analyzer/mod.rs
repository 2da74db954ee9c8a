//! Semantic analyzer for Lazylang.
//!
//! Walks the AST produced by the parser and enforces the rules the later
//! backend relies on: scoping and immutability, flow-mode consistency,
//! unused-result discipline and the current backend's restrictions. The
//! analyzer never mutates or annotates the AST; type spellings stay the
//! opaque strings the parser collected, interpreted by prefix only.

mod error;
mod flow;
mod scope;

pub use error::*;
pub use flow::*;
pub use scope::*;

use std::collections::{HashMap, HashSet};

use crate::lexer::Span;
use crate::parser::ast::{
    Declaration, Expression, Function, Program, Statement, StructDeclaration, TypeName,
};

/// Result of analyzing a node within the AST.
type SemResult<T> = Result<T, SemanticError>;

/// Field types a struct may use.
const PRIMITIVE_TYPES: [&str; 5] = ["int", "float", "bool", "string", "null"];

/// Identifiers reserved for the concurrency surface the backend cannot
/// lower.
const UNSUPPORTED_IDENTIFIERS: [&str; 3] = ["task", "future", "chan"];

/// What the program-global function table knows about a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub return_type: String,
    pub position: Span,
    pub builtin: bool,
}

/// Struct for semantically checking a program.
pub struct Analyzer<'a> {
    program: &'a Program,
    functions: HashMap<String, FunctionInfo>,
}

impl<'a> Analyzer<'a> {
    pub fn new(program: &'a Program) -> Self {
        let mut functions = HashMap::new();
        functions.insert(
            "log".to_string(),
            FunctionInfo {
                return_type: "null".to_string(),
                position: Span::default(),
                builtin: true,
            },
        );

        Self { program, functions }
    }

    /// Check the contained program. The first rule violation aborts the
    /// analysis; on success the AST is accepted unchanged.
    pub fn analyze(mut self) -> Result<(), SemanticError> {
        self.register_functions()?;

        for declaration in &self.program.declarations {
            match declaration {
                Declaration::Function(function) => self.check_function(function)?,
                Declaration::Struct(declaration) => self.check_struct(declaration)?,
            }
        }

        Ok(())
    }

    /// First pass: register every top-level function so bodies can call
    /// forwards. Built-ins are already present, so a user function named
    /// like one is a redeclaration.
    fn register_functions(&mut self) -> SemResult<()> {
        for declaration in &self.program.declarations {
            let Declaration::Function(function) = declaration else {
                continue;
            };

            if self.functions.contains_key(&function.name) {
                return Err(SemanticError::RedeclaredFunction(
                    RedeclaredFunction {
                        name: function.name.clone(),
                    },
                    function.position,
                ));
            }

            self.functions.insert(
                function.name.clone(),
                FunctionInfo {
                    return_type: function.return_type.name.clone(),
                    position: function.position,
                    builtin: false,
                },
            );
        }

        Ok(())
    }

    fn check_function(&self, function: &Function) -> SemResult<()> {
        if function.name == "main" && function.return_type.is_result() {
            return Err(SemanticError::InvalidMainSignature(
                InvalidMainSignature,
                function.return_type.position,
            ));
        }

        self.check_type_supported(&function.return_type)?;

        let mut scope = Scope::new();
        let mut flow = FlowMode::of(&function.return_type);

        for param in &function.params {
            self.check_type_supported(&param.type_name)?;
            flow = self.unify_flow(flow, FlowMode::of(&param.type_name), param.position)?;

            scope
                .add_variable(Variable {
                    name: param.name.clone(),
                    mutable: false,
                    type_name: param.type_name.name.clone(),
                    position: param.position,
                })
                .map_err(|_| {
                    SemanticError::RedeclaredVariable(
                        RedeclaredVariable {
                            name: param.name.clone(),
                        },
                        param.position,
                    )
                })?;
        }

        // Parameters and the body's own bindings share the function frame.
        for statement in &function.body.statements {
            self.check_statement(statement, &mut scope, &mut flow)?;
        }

        Ok(())
    }

    fn check_statement(
        &self,
        statement: &Statement,
        scope: &mut Scope,
        flow: &mut FlowMode,
    ) -> SemResult<()> {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                self.check_type_supported(&declaration.type_name)?;
                *flow = self.unify_flow(
                    *flow,
                    FlowMode::of(&declaration.type_name),
                    declaration.type_name.position,
                )?;

                self.check_expression(&declaration.value, scope)?;

                scope
                    .add_variable(Variable {
                        name: declaration.name.clone(),
                        mutable: declaration.mutable,
                        type_name: declaration.type_name.name.clone(),
                        position: declaration.position,
                    })
                    .map_err(|_| {
                        SemanticError::RedeclaredVariable(
                            RedeclaredVariable {
                                name: declaration.name.clone(),
                            },
                            declaration.position,
                        )
                    })
            }
            Statement::Assignment(assignment) => {
                let Some(target) = scope.resolve(&assignment.name) else {
                    return Err(SemanticError::AssignmentToUndeclared(
                        AssignmentToUndeclared {
                            name: assignment.name.clone(),
                        },
                        assignment.position,
                    ));
                };

                if !target.mutable {
                    return Err(SemanticError::ImmutableReassign(
                        ImmutableReassign {
                            name: assignment.name.clone(),
                        },
                        assignment.position,
                    ));
                }

                self.check_expression(&assignment.value, scope)
            }
            Statement::If(if_statement) => {
                self.check_expression(&if_statement.condition, scope)?;

                scope.enter_scope();
                for statement in &if_statement.then_block.statements {
                    self.check_statement(statement, scope, flow)?;
                }
                scope.exit_scope();

                if let Some(else_block) = &if_statement.else_block {
                    scope.enter_scope();
                    for statement in &else_block.statements {
                        self.check_statement(statement, scope, flow)?;
                    }
                    scope.exit_scope();
                }

                Ok(())
            }
            Statement::For(for_loop) => {
                self.check_expression(&for_loop.iterable, scope)?;

                scope.enter_scope();
                scope
                    .add_variable(Variable {
                        name: for_loop.iterator.clone(),
                        mutable: false,
                        type_name: String::new(),
                        position: for_loop.position,
                    })
                    .map_err(|_| {
                        SemanticError::RedeclaredVariable(
                            RedeclaredVariable {
                                name: for_loop.iterator.clone(),
                            },
                            for_loop.position,
                        )
                    })?;
                for statement in &for_loop.body.statements {
                    self.check_statement(statement, scope, flow)?;
                }
                scope.exit_scope();

                Ok(())
            }
            Statement::Return(return_statement) => {
                if let Some(value) = &return_statement.value {
                    self.check_expression(value, scope)?;
                }
                Ok(())
            }
            Statement::Expression(expression) => {
                self.check_expression(expression, scope)?;
                self.check_unused_result(expression, scope)
            }
        }
    }

    fn check_expression(&self, expression: &Expression, scope: &Scope) -> SemResult<()> {
        match expression {
            Expression::Num(_)
            | Expression::StringLiteral(_)
            | Expression::Bool(_)
            | Expression::Null(_) => Ok(()),
            Expression::Id(id) => {
                if UNSUPPORTED_IDENTIFIERS.contains(&id.name.as_str()) {
                    return Err(SemanticError::UnsupportedIdentifier(
                        UnsupportedIdentifier {
                            name: id.name.clone(),
                        },
                        id.position,
                    ));
                }

                if scope.resolve(&id.name).is_some() || self.functions.contains_key(&id.name) {
                    return Ok(());
                }

                Err(SemanticError::UndeclaredIdentifier(
                    UndeclaredIdentifier {
                        name: id.name.clone(),
                    },
                    id.position,
                ))
            }
            Expression::Call(call) => {
                self.check_expression(&call.callee, scope)?;

                if let Expression::Id(id) = &call.callee {
                    let shadowed = scope.resolve(&id.name).is_some();
                    let is_builtin = self
                        .functions
                        .get(&id.name)
                        .is_some_and(|info| info.builtin);

                    if !shadowed && is_builtin && call.arguments.len() != 1 {
                        return Err(SemanticError::BuiltinArity(
                            BuiltinArity {
                                name: id.name.clone(),
                                expected: 1,
                                found: call.arguments.len(),
                            },
                            call.position,
                        ));
                    }
                }

                for argument in &call.arguments {
                    self.check_expression(argument, scope)?;
                }

                Ok(())
            }
            Expression::Binary(binary) => {
                self.check_expression(&binary.left, scope)?;
                self.check_expression(&binary.right, scope)
            }
        }
    }

    /// An expression statement must not discard the value of a call to a
    /// `result`-returning function.
    fn check_unused_result(&self, expression: &Expression, scope: &Scope) -> SemResult<()> {
        let Expression::Call(call) = expression else {
            return Ok(());
        };
        let Expression::Id(id) = &call.callee else {
            return Ok(());
        };

        if scope.resolve(&id.name).is_some() {
            return Ok(());
        }

        if let Some(info) = self.functions.get(&id.name) {
            if FlowMode::of_name(&info.return_type) == FlowMode::Result {
                return Err(SemanticError::UnusedResult(
                    UnusedResult {
                        name: id.name.clone(),
                    },
                    call.position,
                ));
            }
        }

        Ok(())
    }

    fn check_struct(&self, declaration: &StructDeclaration) -> SemResult<()> {
        let mut seen = HashSet::new();

        for field in &declaration.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SemanticError::DuplicateStructField(
                    DuplicateStructField {
                        struct_name: declaration.name.clone(),
                        field: field.name.clone(),
                    },
                    field.position,
                ));
            }

            if !PRIMITIVE_TYPES.contains(&field.type_name.name.as_str()) {
                return Err(SemanticError::InvalidFieldType(
                    InvalidFieldType {
                        struct_name: declaration.name.clone(),
                        field: field.name.clone(),
                        type_name: field.type_name.name.clone(),
                    },
                    field.type_name.position,
                ));
            }
        }

        Ok(())
    }

    fn check_type_supported(&self, type_name: &TypeName) -> SemResult<()> {
        if type_name.is_future() || type_name.is_chan() {
            return Err(SemanticError::UnsupportedType(
                UnsupportedType {
                    type_name: type_name.name.clone(),
                },
                type_name.position,
            ));
        }

        Ok(())
    }

    fn unify_flow(
        &self,
        existing: FlowMode,
        incoming: FlowMode,
        position: Span,
    ) -> SemResult<FlowMode> {
        existing.unify(incoming).ok_or(SemanticError::FlowModeMismatch(
            FlowModeMismatch { existing, incoming },
            position,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn analyze(source: &str) -> Result<(), SemanticError> {
        let tokens = Lexer::new(source).lex().expect("lexing should succeed");
        let program = Parser::new(tokens)
            .parse_program()
            .expect("parsing should succeed");
        Analyzer::new(&program).analyze()
    }

    fn analyze_err(source: &str) -> SemanticError {
        analyze(source).expect_err("analysis should reject the program")
    }

    #[test]
    fn test_accepts_minimal_program() {
        assert!(analyze("main: () -> null = ()\n    log(\"Hello\")\n").is_ok());
    }

    #[test]
    fn test_accepts_parameters_and_locals() {
        let source = "add: (int, int) -> int = (a, b)\n    sum: int = a + b\n    return sum\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_rejects_redeclared_variable() {
        let source = "main: () -> null = ()\n    x: int = 1\n    x: int = 2\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::RedeclaredVariable(..)
        ));
    }

    #[test]
    fn test_allows_shadowing_in_nested_block() {
        let source =
            "main: () -> null = ()\n    x: int = 1\n    if true\n        x: int = 2\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_rejects_assignment_to_undeclared() {
        let source = "main: () -> null = ()\n    x = 2\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::AssignmentToUndeclared(..)
        ));
    }

    #[test]
    fn test_rejects_assignment_to_immutable() {
        let source = "main: () -> null = ()\n    x: int = 1\n    x = 2\n";
        let err = analyze_err(source);

        assert!(matches!(err, SemanticError::ImmutableReassign(..)));
        assert!(err
            .to_string()
            .contains("cannot assign to immutable variable"));
        assert_eq!(err.span().line, 3);
        assert_eq!(err.span().col, 5);
    }

    #[test]
    fn test_accepts_assignment_to_mutable() {
        let source = "main: () -> null = ()\n    mut x: int = 1\n    x = 2\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_rejects_undeclared_identifier() {
        let source = "main: () -> null = ()\n    y: int = ghost\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::UndeclaredIdentifier(..)
        ));
    }

    #[test]
    fn test_rejects_redeclared_function() {
        let source = "f: () -> null = ()\n    log(\"a\")\nf: () -> null = ()\n    log(\"b\")\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::RedeclaredFunction(..)
        ));
    }

    #[test]
    fn test_rejects_function_named_like_builtin() {
        let source = "log: () -> null = ()\n    return\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::RedeclaredFunction(..)
        ));
    }

    #[test]
    fn test_rejects_flow_mode_mix() {
        let source = "f: (maybe[int]) -> result[int,int] = (x)\n    return x\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::FlowModeMismatch(..)
        ));
    }

    #[test]
    fn test_accepts_agreeing_flow_modes() {
        let source = "f: (maybe[int]) -> maybe[int] = (x)\n    return x\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_local_contributes_flow_mode() {
        let source = "f: () -> result[int,int] = ()\n    m: maybe[int] = null\n    return m\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::FlowModeMismatch(..)
        ));
    }

    #[test]
    fn test_rejects_ignored_result_call() {
        let source = "f: () -> result[int,int] = ()\n    return 1\nmain: () -> null = ()\n    f()\n";
        let err = analyze_err(source);

        assert!(matches!(err, SemanticError::UnusedResult(..)));
        assert!(err
            .to_string()
            .contains("result-returning function must not be ignored"));
    }

    #[test]
    fn test_accepts_result_call_bound_to_variable() {
        let source =
            "f: () -> result[int,int] = ()\n    return 1\ng: () -> result[int,int] = ()\n    r: result[int,int] = f()\n    return r\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_rejects_future_type() {
        let source = "f: (future[int]) -> null = (x)\n    return\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::UnsupportedType(..)
        ));
    }

    #[test]
    fn test_rejects_chan_identifier() {
        let source = "main: () -> null = ()\n    x: int = chan\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::UnsupportedIdentifier(..)
        ));
    }

    #[test]
    fn test_rejects_duplicate_struct_field() {
        let source = "struct User\n    name: string\n    name: int\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::DuplicateStructField(..)
        ));
    }

    #[test]
    fn test_rejects_complex_struct_field() {
        let source = "struct Holder\n    value: result[int,int]\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::InvalidFieldType(..)
        ));
    }

    #[test]
    fn test_rejects_self_referential_struct_field() {
        let source = "struct Node\n    next: Node\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::InvalidFieldType(..)
        ));
    }

    #[test]
    fn test_rejects_main_returning_result() {
        let source = "main: () -> result[int,int] = ()\n    return 1\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::InvalidMainSignature(..)
        ));
    }

    #[test]
    fn test_rejects_log_with_wrong_arity() {
        let source = "main: () -> null = ()\n    log(\"a\", \"b\")\n";
        assert!(matches!(analyze_err(source), SemanticError::BuiltinArity(..)));
    }

    #[test]
    fn test_for_loop_iterator_is_scoped() {
        let source = "main: () -> null = ()\n    for item in items\n        log(\"x\")\n";
        assert!(matches!(
            analyze_err(source),
            SemanticError::UndeclaredIdentifier(..)
        ));
    }

    #[test]
    fn test_for_loop_body_sees_iterator() {
        let source =
            "main: () -> null = ()\n    xs: int = 0\n    for item in xs\n        y: int = item\n";
        assert!(analyze(source).is_ok());
    }

    #[test]
    fn test_analysis_is_idempotent_on_success() {
        let source = "main: () -> null = ()\n    log(\"Hello\")\n";
        let tokens = Lexer::new(source).lex().expect("lexing should succeed");
        let program = Parser::new(tokens)
            .parse_program()
            .expect("parsing should succeed");

        assert!(Analyzer::new(&program).analyze().is_ok());
        assert!(Analyzer::new(&program).analyze().is_ok());
    }
}
