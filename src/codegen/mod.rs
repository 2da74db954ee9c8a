//! C backend for Lazylang.
//!
//! Lowers a validated AST into a single self-contained C translation unit
//! that includes the runtime header and routes every observable write
//! through the runtime's assignment helpers. Emission is deterministic:
//! structs, functions, fields, statements and arguments come out in source
//! order, and identical input produces byte-identical output.

mod build;
mod c_types;

pub use build::*;

use std::collections::{HashMap, HashSet};
use std::{error::Error, fmt::Display};

use crate::lexer::Span;
use crate::parser::ast::{
    Declaration, Expression, Function, Program, Statement, StructDeclaration,
};

use self::c_types::{assign_helper, c_return_type, c_type, escape_c_string};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenError {
    pub message: String,
    pub position: Option<Span>,
}

impl Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(
                f,
                "[line {}:{}] Codegen error: {}",
                position.line, position.col, self.message
            )
        } else {
            write!(f, "Codegen error: {}", self.message)
        }
    }
}

impl Error for CodegenError {}

/// Return slot threaded through block emission when the last statement of
/// a block has to produce the function's return value.
struct TailSlot {
    var: String,
    helper: String,
}

/// Struct for lowering a program to C source text.
pub struct Codegen<'a> {
    program: &'a Program,
    structs: Vec<&'a StructDeclaration>,
    struct_names: HashSet<String>,
    functions: HashMap<String, &'a Function>,
    scopes: Vec<HashMap<String, String>>,
    out: String,
}

impl<'a> Codegen<'a> {
    pub fn new(program: &'a Program) -> Self {
        let mut structs = vec![];
        let mut struct_names = HashSet::new();
        let mut functions = HashMap::new();

        for declaration in &program.declarations {
            match declaration {
                Declaration::Struct(declaration) => {
                    structs.push(declaration);
                    struct_names.insert(declaration.name.clone());
                }
                Declaration::Function(function) => {
                    functions.insert(function.name.clone(), function);
                }
            }
        }

        Self {
            program,
            structs,
            struct_names,
            functions,
            scopes: vec![],
            out: String::new(),
        }
    }

    /// Emit the whole translation unit. Emission phases run in a fixed
    /// order; a failure leaves no partial output behind because the buffer
    /// is owned by this generator.
    pub fn generate(mut self) -> Result<String, CodegenError> {
        self.emit_prelude();
        self.emit_struct_forward_declarations();
        self.emit_struct_definitions();
        self.emit_struct_assign_helpers();
        self.emit_function_prototypes();
        self.emit_function_bodies()?;
        self.emit_entry_point();

        Ok(self.out)
    }

    fn emit_prelude(&mut self) {
        self.out
            .push_str("/* Generated by the lazylang compiler. Do not edit. */\n\n");
        self.out.push_str("#include <stdbool.h>\n");
        self.out.push_str("#include <stdint.h>\n");
        self.out.push_str("#include <stdio.h>\n\n");
        self.out.push_str("#define LZ_RUNTIME_INTERNAL 1\n");
        self.out.push_str("#include \"src/runtime/runtime.h\"\n\n");
    }

    fn emit_struct_forward_declarations(&mut self) {
        for declaration in &self.structs {
            self.out.push_str(&format!(
                "typedef struct {name} {name};\n",
                name = declaration.name
            ));
        }

        if !self.structs.is_empty() {
            self.out.push('\n');
        }
    }

    fn emit_struct_definitions(&mut self) {
        for declaration in &self.structs {
            self.out
                .push_str(&format!("struct {} {{\n", declaration.name));
            for field in &declaration.fields {
                self.out.push_str(&format!(
                    "    {} {};\n",
                    c_type(&field.type_name.name, &self.struct_names),
                    field.name
                ));
            }
            self.out.push_str("};\n\n");
        }
    }

    fn emit_struct_assign_helpers(&mut self) {
        for declaration in &self.structs {
            self.out.push_str(&format!(
                "static inline void lz_assign_struct_{name}({name} *dst, {name} value) {{\n    *dst = value;\n}}\n\n",
                name = declaration.name
            ));
        }
    }

    fn emit_function_prototypes(&mut self) {
        for declaration in &self.program.declarations {
            if let Declaration::Function(function) = declaration {
                let signature = self.function_signature(function);
                self.out.push_str(&format!("{signature};\n"));
            }
        }

        self.out.push('\n');
    }

    fn emit_function_bodies(&mut self) -> Result<(), CodegenError> {
        let program = self.program;
        for declaration in &program.declarations {
            if let Declaration::Function(function) = declaration {
                self.emit_function_body(function)?;
            }
        }

        Ok(())
    }

    fn function_signature(&self, function: &Function) -> String {
        let return_type = c_return_type(&function.return_type.name, &self.struct_names);

        let params = if function.params.is_empty() {
            "void".to_string()
        } else {
            function
                .params
                .iter()
                .map(|param| {
                    format!(
                        "{} {}",
                        c_type(&param.type_name.name, &self.struct_names),
                        param.name
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!("static {return_type} lz_fn_{}({params})", function.name)
    }

    fn emit_function_body(&mut self, function: &Function) -> Result<(), CodegenError> {
        let signature = self.function_signature(function);
        self.out.push_str(&format!("{signature} {{\n"));

        let mut frame = HashMap::new();
        for param in &function.params {
            frame.insert(param.name.clone(), param.type_name.name.clone());
        }
        self.scopes.push(frame);

        // A non-void function whose body does not end in `return` gets a
        // synthesized return slot; the tail statement of the body (and of
        // every nested if/else branch in tail position) assigns into it.
        let needs_tail = !function.return_type.is_null()
            && !matches!(function.body.statements.last(), Some(Statement::Return(_)));

        let tail = if needs_tail {
            let slot_type = c_type(&function.return_type.name, &self.struct_names);
            self.out
                .push_str(&format!("    {slot_type} __lz_ret = {{0}};\n"));
            Some(TailSlot {
                var: "__lz_ret".to_string(),
                helper: assign_helper(&function.return_type.name, &self.struct_names),
            })
        } else {
            None
        };

        self.emit_block_statements(&function.body.statements, 1, tail.as_ref())?;

        if tail.is_some() {
            self.out.push_str("    return __lz_ret;\n");
        }

        self.scopes.pop();
        self.out.push_str("}\n\n");

        Ok(())
    }

    /// Emit a run of statements. Only the last one sees the tail slot.
    fn emit_block_statements(
        &mut self,
        statements: &[Statement],
        level: usize,
        tail: Option<&TailSlot>,
    ) -> Result<(), CodegenError> {
        let last = statements.len().saturating_sub(1);

        for (index, statement) in statements.iter().enumerate() {
            let tail = if index == last { tail } else { None };
            self.emit_statement(statement, level, tail)?;
        }

        Ok(())
    }

    fn emit_statement(
        &mut self,
        statement: &Statement,
        level: usize,
        tail: Option<&TailSlot>,
    ) -> Result<(), CodegenError> {
        let indent = "    ".repeat(level);

        match statement {
            Statement::VariableDeclaration(declaration) => {
                let slot_type = c_type(&declaration.type_name.name, &self.struct_names);
                let helper = assign_helper(&declaration.type_name.name, &self.struct_names);
                let value = self.emit_expression(&declaration.value)?;

                self.out.push_str(&format!(
                    "{indent}{slot_type} {name} = {{0}};\n{indent}{helper}(&{name}, {value});\n",
                    name = declaration.name
                ));

                if let Some(frame) = self.scopes.last_mut() {
                    frame.insert(declaration.name.clone(), declaration.type_name.name.clone());
                }

                Ok(())
            }
            Statement::Assignment(assignment) => {
                let Some(type_name) = self.lookup_local(&assignment.name) else {
                    return Err(CodegenError {
                        message: format!("unknown assignment target '{}'", assignment.name),
                        position: Some(assignment.position),
                    });
                };

                let helper = assign_helper(&type_name, &self.struct_names);
                let value = self.emit_expression(&assignment.value)?;
                self.out.push_str(&format!(
                    "{indent}{helper}(&{}, {value});\n",
                    assignment.name
                ));

                Ok(())
            }
            Statement::If(if_statement) => {
                let condition = self.emit_expression(&if_statement.condition)?;
                self.out.push_str(&format!("{indent}if ({condition}) {{\n"));

                self.scopes.push(HashMap::new());
                self.emit_block_statements(&if_statement.then_block.statements, level + 1, tail)?;
                self.scopes.pop();

                if let Some(else_block) = &if_statement.else_block {
                    self.out.push_str(&format!("{indent}}} else {{\n"));

                    self.scopes.push(HashMap::new());
                    self.emit_block_statements(&else_block.statements, level + 1, tail)?;
                    self.scopes.pop();
                }

                self.out.push_str(&format!("{indent}}}\n"));

                Ok(())
            }
            Statement::For(for_loop) => Err(CodegenError {
                message: "for loops are not supported by the C backend".to_string(),
                position: Some(for_loop.position),
            }),
            Statement::Return(return_statement) => {
                match &return_statement.value {
                    Some(value) => {
                        let value = self.emit_expression(value)?;
                        self.out.push_str(&format!("{indent}return {value};\n"));
                    }
                    None => self.out.push_str(&format!("{indent}return;\n")),
                }

                Ok(())
            }
            Statement::Expression(expression) => {
                let code = self.emit_expression(expression)?;

                match tail {
                    Some(slot) => self.out.push_str(&format!(
                        "{indent}{}(&{}, {code});\n",
                        slot.helper, slot.var
                    )),
                    None => self.out.push_str(&format!("{indent}{code};\n")),
                }

                Ok(())
            }
        }
    }

    fn emit_expression(&self, expression: &Expression) -> Result<String, CodegenError> {
        match expression {
            Expression::Num(num) => Ok(num.text().to_string()),
            Expression::Bool(bool) => Ok(if bool.value { "true" } else { "false" }.to_string()),
            Expression::Null(_) => Ok("NULL".to_string()),
            Expression::StringLiteral(string) => Ok(format!(
                "lz_string_from_literal(\"{}\")",
                escape_c_string(&string.value)
            )),
            Expression::Id(id) => Ok(self.rewrite_identifier(&id.name)),
            Expression::Call(call) => {
                let callee = self.emit_expression(&call.callee)?;
                let arguments = call
                    .arguments
                    .iter()
                    .map(|argument| self.emit_expression(argument))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");

                Ok(format!("{callee}({arguments})"))
            }
            Expression::Binary(binary) => {
                let left = self.emit_expression(&binary.left)?;
                let right = self.emit_expression(&binary.right)?;

                // Always parenthesized; C precedence never gets a say.
                Ok(format!("({left} {} {right})", binary.operator))
            }
        }
    }

    /// Rewrite an identifier for the C side: the `log` built-in becomes the
    /// runtime logger, locals stay as they are, user functions get the
    /// `lz_fn_` prefix, anything else passes through verbatim.
    fn rewrite_identifier(&self, name: &str) -> String {
        if name == "log" {
            return "lz_runtime_log".to_string();
        }

        if self.lookup_local(name).is_some() {
            return name.to_string();
        }

        if self.functions.contains_key(name) {
            return format!("lz_fn_{name}");
        }

        name.to_string()
    }

    fn lookup_local(&self, name: &str) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).cloned())
    }

    fn emit_entry_point(&mut self) {
        if self.functions.contains_key("main") {
            self.out
                .push_str("int main(void) {\n    lz_fn_main();\n    return 0;\n}\n");
        } else {
            self.out.push_str(
                "int main(void) {\n    printf(\"no entry point defined\\n\");\n    return 1;\n}\n",
            );
        }
    }
}
