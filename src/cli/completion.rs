//! Shell integration scripts
//!
//! Each script carries clap's completion for `cmdcomplete` itself, followed
//! by a hook that hands the indexed program's command line to
//! `cmdcomplete complete`.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

/// Name of this binary as seen by the shell
const BIN_NAME: &str = "cmdcomplete";

/// Print the integration script for `shell_name`, registering `program`
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
/// * `program` - Program whose completion is delegated to cmdcomplete
pub fn generate_completion(shell_name: &str, program: &str) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    print!("{}", render_script(shell, program));
    Ok(())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        ))
        .into()),
    }
}

/// Build the full script for one of the supported shells
fn render_script(shell: Shell, program: &str) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    let basic_completion = String::from_utf8_lossy(&buffer);

    let hook = match shell {
        Shell::Zsh => zsh_hook(program),
        Shell::Fish => fish_hook(program),
        _ => bash_hook(program),
    };

    format!("{}\n{}", basic_completion, hook)
}

/// bash passes the line and cursor in COMP_LINE/COMP_POINT to `complete -C`
fn bash_hook(program: &str) -> String {
    format!(
        r#"
# Completion for {program}, answered by {bin}
complete -C '{bin} complete' {program}
"#,
        program = program,
        bin = BIN_NAME
    )
}

fn zsh_hook(program: &str) -> String {
    format!(
        r#"
# Completion for {program}, answered by {bin} through bash compatibility
autoload -Uz bashcompinit && bashcompinit
complete -C '{bin} complete' {program}
"#,
        program = program,
        bin = BIN_NAME
    )
}

fn fish_hook(program: &str) -> String {
    format!(
        r#"
# Completion for {program}, answered by {bin}
function __{bin}_{ident}
    set -lx COMP_LINE (commandline -cp)
    {bin} complete 2>/dev/null
end

complete -c {program} -f -a "(__{bin}_{ident})"
"#,
        program = program,
        bin = BIN_NAME,
        ident = program.replace(|c: char| !c.is_ascii_alphanumeric(), "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert!(matches!(parse_shell("bash"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("fish"), Ok(Shell::Fish)));
        assert!(parse_shell("invalid").is_err());
        assert!(parse_shell("powershell").is_err());
    }

    #[test]
    fn test_parse_shell_case_insensitive() {
        assert!(matches!(parse_shell("BASH"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("Zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("FiSh"), Ok(Shell::Fish)));
    }

    #[test]
    fn test_bash_script_registers_program() {
        let script = render_script(Shell::Bash, "aws");
        assert!(script.contains("complete -C 'cmdcomplete complete' aws"));
        assert!(script.contains("_cmdcomplete"));
    }

    #[test]
    fn test_zsh_script_uses_bashcompinit() {
        let script = render_script(Shell::Zsh, "aws");
        assert!(script.contains("bashcompinit"));
        assert!(script.contains("complete -C 'cmdcomplete complete' aws"));
    }

    #[test]
    fn test_fish_script_sets_comp_line() {
        let script = render_script(Shell::Fish, "my-tool");
        assert!(script.contains("set -lx COMP_LINE (commandline -cp)"));
        assert!(script.contains("complete -c my-tool -f -a \"(__cmdcomplete_my_tool)\""));
        assert!(script.contains("function __cmdcomplete_my_tool"));
    }
}
