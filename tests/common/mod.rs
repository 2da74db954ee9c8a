use lazylang::analyzer::Analyzer;
use lazylang::codegen::Codegen;
use lazylang::lexer::Lexer;
use lazylang::parser::Parser;

/// Run the full in-process pipeline over a source string and return the
/// generated C translation unit, or the first diagnostic of the failing
/// stage.
pub fn compile_to_c(source: &str) -> Result<String, String> {
    let tokens = Lexer::new(source).lex().map_err(|err| err.to_string())?;
    let program = Parser::new(tokens)
        .parse_program()
        .map_err(|err| err.to_string())?;
    Analyzer::new(&program)
        .analyze()
        .map_err(|err| err.to_string())?;
    Codegen::new(&program)
        .generate()
        .map_err(|err| err.to_string())
}
