use std::io::{self, Write};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use valforge_cli::pipeline::{InputSource, OutputTarget, load_input, plan_outputs, write_unit};
use valforge_core::{CompileError, RuleRegistry, check, compile};
use valforge_model::{CompilerErrors, GenerateOptions, TypeSet};

use crate::cli::{CheckArgs, GenerateArgs, InputArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{CheckResult, GenerateResult, UnitSummary};

pub fn run_rules() -> Result<()> {
    let registry = RuleRegistry::with_builtins().context("build rule registry")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Aliases"),
        header_cell("Priority"),
        header_cell("Types"),
        header_cell("Imports"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for rule in registry.distinct_rules() {
        table.add_row(vec![
            rule.name().to_string(),
            rule.aliases().join(", "),
            rule.priority().to_string(),
            describe_kinds(rule.supported_kinds()),
            rule.dependencies().join(", "),
            rule.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_version() {
    println!("valforge: {}", env!("CARGO_PKG_VERSION"));
}

fn input_source(args: &InputArgs) -> Result<InputSource> {
    args.source().context("no input file, source file or package specified")
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let source = input_source(&args.input)?;
    let span = info_span!("check", input = %source.path().display());
    let _guard = span.enter();

    let records = load_input(&source)?;
    let registry = RuleRegistry::with_builtins().context("build rule registry")?;
    let diagnostics = check(&records, &registry)
        .with_context(|| format!("type-check {}", source.path().display()))?;

    Ok(CheckResult {
        input: source.path().to_path_buf(),
        records: records.iter().filter(|record| record.has_rules()).count(),
        rules: records.iter().map(|record| record.rule_count()).sum(),
        diagnostics,
    })
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let source = input_source(&args.input)?;
    let span = info_span!("generate", input = %source.path().display());
    let _guard = span.enter();

    let records = load_input(&source)?;
    let registry = RuleRegistry::with_builtins().context("build rule registry")?;
    let options = GenerateOptions::new()
        .with_runtime_crate(args.runtime_crate.as_str())
        .with_method_name(args.method_name.as_str());

    let units = match compile(&records, &registry, &options) {
        Ok(units) => units,
        Err(CompileError::Diagnostics(diagnostics)) => {
            return Ok(GenerateResult {
                input: source.path().to_path_buf(),
                units: Vec::new(),
                diagnostics,
                to_stdout: args.stdout,
            });
        }
        Err(error) => {
            return Err(error).with_context(|| format!("compile {}", source.path().display()));
        }
    };

    let mut summaries = Vec::with_capacity(units.len());
    if args.stdout {
        let mut stdout = io::stdout().lock();
        for (idx, unit) in units.iter().enumerate() {
            if idx > 0 {
                writeln!(stdout).context("write to stdout")?;
            }
            stdout
                .write_all(unit.source.as_bytes())
                .context("write to stdout")?;
            summaries.push(UnitSummary {
                namespace: unit.namespace.clone(),
                records: unit.records.clone(),
                dependencies: unit.dependencies.clone(),
                path: None,
            });
        }
    } else {
        let target = OutputTarget {
            output: args.output.clone(),
            out_dir: args.out_dir.clone(),
        };
        let paths = plan_outputs(&source, &units, &target)?;
        for (unit, path) in units.iter().zip(paths) {
            write_unit(&path, unit)?;
            info!(path = %path.display(), records = unit.records.len(), "wrote validation code");
            summaries.push(UnitSummary {
                namespace: unit.namespace.clone(),
                records: unit.records.clone(),
                dependencies: unit.dependencies.clone(),
                path: Some(path),
            });
        }
    }

    Ok(GenerateResult {
        input: source.path().to_path_buf(),
        units: summaries,
        diagnostics: CompilerErrors::new(),
        to_stdout: args.stdout,
    })
}

/// Compact label for a rule's accepted kinds.
fn describe_kinds(kinds: TypeSet) -> String {
    if kinds == TypeSet::INTEGER {
        "integers".to_string()
    } else if kinds == TypeSet::STRING_AND_INTEGER {
        "string, integers".to_string()
    } else if kinds == TypeSet::PRIMITIVE {
        "all primitives".to_string()
    } else {
        kinds
            .kinds()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
