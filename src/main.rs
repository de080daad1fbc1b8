//! Command-line interface for sep2

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use sep2::any::{self, parse_any_with, AnyResource};
#[cfg(feature = "cli")]
use sep2::defaults::{Defaults, RecognizedDefault};
#[cfg(feature = "cli")]
use sep2::limits::Limits;
#[cfg(feature = "cli")]
use sep2::oracle::{SchemaOracle, StructuralOracle};
#[cfg(feature = "cli")]
use sep2::projection::{flattened, FieldSpec, Occurs, Placement, ProjectionConfig};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "sep2")]
#[command(author, version, about = "IEEE 2030.5 resource inspection tool", long_about = None)]
struct Cli {
    /// Use strict parser limits for constrained devices
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a resource document and summarize it
    Inspect {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Parse a resource document and write it back in canonical form
    Canonicalize {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Spaces per nesting level, 0 for a single line
        #[arg(short, long, default_value_t = 2)]
        indent: usize,

        /// Omit the XML declaration
        #[arg(long)]
        no_declaration: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the field table of a resource type
    Fields {
        /// Type name, e.g. EndDevice
        #[arg(value_name = "TYPE")]
        type_name: Option<String>,

        /// Merge base type rows into the table
        #[arg(short, long)]
        flat: bool,
    },

    /// Print the effective constructor defaults
    Defaults {
        /// JSON file with default overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override one default, e.g. pollRate=60
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let limits = if cli.strict { Limits::strict() } else { Limits::default() };

    let result = match cli.command {
        Commands::Inspect { file, json } => cmd_inspect(file, json, &limits),
        Commands::Canonicalize {
            file,
            indent,
            no_declaration,
            output,
        } => {
            let config = ProjectionConfig::default()
                .with_indent(indent)
                .with_declaration(!no_declaration);
            cmd_canonicalize(file, &config, output, &limits)
        }
        Commands::Fields { type_name, flat } => cmd_fields(type_name, flat),
        Commands::Defaults { config, overrides } => cmd_defaults(config, overrides),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load(file: &Path, limits: &Limits) -> Result<AnyResource, Box<dyn std::error::Error>> {
    limits.check_size(usize::try_from(fs::metadata(file)?.len()).unwrap_or(usize::MAX))?;
    let xml = fs::read_to_string(file)?;
    log::info!("parsing {}", file.display());
    Ok(parse_any_with(&xml, limits)?)
}

#[cfg(feature = "cli")]
fn cmd_inspect(file: PathBuf, json_output: bool, limits: &Limits) -> Result<(), Box<dyn std::error::Error>> {
    let resource = load(&file, limits)?;
    let root = resource.to_element();

    let oracle = StructuralOracle;
    let schema = oracle.compile("sep.xsd")?;
    let xml = resource.to_xml_with(&ProjectionConfig::compact())?;
    let conformance = oracle.validate(&schema, xml.as_bytes());

    if json_output {
        let json = serde_json::json!({
            "type": resource.element_name(),
            "attributes": root
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), serde_json::Value::from(value.as_str())))
                .collect::<serde_json::Map<_, _>>(),
            "elements": root.children.iter().map(|c| c.local_name()).collect::<Vec<_>>(),
            "conforms": conformance.is_ok(),
            "violation": conformance.as_ref().err().map(|v| v.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Resource: {}", resource.element_name());
    if !root.attributes.is_empty() {
        println!("  Attributes:");
        for (name, value) in &root.attributes {
            println!("    @{} = {}", name, value);
        }
    }
    if !root.children.is_empty() {
        println!("  Elements:");
        for child in &root.children {
            match (&child.text, child.get_attribute("href")) {
                (Some(text), _) => println!("    <{}> {}", child.local_name(), text),
                (None, Some(href)) => println!("    <{}> -> {}", child.local_name(), href),
                (None, None) => println!("    <{}>", child.local_name()),
            }
        }
    }
    match conformance {
        Ok(()) => println!("Structure: ok"),
        Err(violation) => println!("Structure: {}", violation),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_canonicalize(
    file: PathBuf,
    config: &ProjectionConfig,
    output: Option<PathBuf>,
    limits: &Limits,
) -> Result<(), Box<dyn std::error::Error>> {
    let resource = load(&file, limits)?;
    let xml = resource.to_xml_with(config)?;

    if let Some(output_path) = output {
        fs::write(&output_path, &xml)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", xml);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_fields(type_name: Option<String>, flat: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(type_name) = type_name else {
        println!("Known types:");
        for name in any::type_names() {
            println!("  {}", name);
        }
        return Ok(());
    };

    let fields = any::fields_of(&type_name).ok_or_else(|| format!("Unknown type: {}", type_name))?;
    println!("{}:", type_name);
    if flat {
        for spec in flattened(fields) {
            print_row(spec);
        }
    } else {
        for spec in fields {
            print_row(spec);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_row(spec: &FieldSpec) {
    let occurs = match spec.occurs {
        Occurs::Required => "",
        Occurs::Optional => "?",
        Occurs::Repeated => "*",
    };
    match spec.placement {
        Placement::Attribute => println!("  @{}{}", spec.name, occurs),
        Placement::SimpleElement => println!("  <{}>{}", spec.name, occurs),
        Placement::ComplexElement(_) => println!("  <{}>{} (complex)", spec.name, occurs),
        Placement::Flatten(_) => println!("  extends {}", spec.name),
    }
}

#[cfg(feature = "cli")]
fn cmd_defaults(config: Option<PathBuf>, overrides: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut defaults = match config {
        Some(path) => Defaults::from_json_file(path)?,
        None => Defaults::default(),
    };
    for assignment in &overrides {
        defaults.apply_override(assignment)?;
    }
    for which in RecognizedDefault::ALL {
        println!("{} = {}", which, defaults.get(which));
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
