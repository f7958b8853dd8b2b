use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use treepath::output::write_results;
use treepath::{
    CliError, FunctionRegistry, InputFormat, NodeRef, OutputMode, ParentIndex, PathExpression,
    TreeNode, XmlDocument, input,
};

/// Evaluate a path expression against a JSON or XML tree
#[derive(Parser, Debug)]
#[command(name = "treepath")]
#[command(about = "Select nodes of a labeled tree with a path expression", long_about = None)]
struct Args {
    /// The path expression, e.g. `//item[@value='x']`
    expression: String,

    /// The tree to query; standard input if omitted
    #[arg(value_name = "FILE")]
    tree: Option<PathBuf>,

    /// Input syntax; inferred from the file extension if omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// What to print for the matches
    #[arg(long, value_enum, default_value_t = OutputMode::Nodes)]
    output: OutputMode,

    /// Do not register the built-in `terminal` and `last` functions
    #[arg(long)]
    no_builtins: bool,

    /// Resolve parents by searching from the root instead of through an index (JSON only)
    #[arg(long)]
    no_parent_index: bool,

    /// Expose the values of terminal children as attributes of their parent (JSON only)
    #[arg(long)]
    dynamic_properties: bool,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();

    // Parse before reading any input so a bad expression fails fast.
    let expression: PathExpression = args.expression.parse()?;
    let text = input::read_input(args.tree.as_deref())?;
    let format = args
        .format
        .unwrap_or_else(|| InputFormat::detect(args.tree.as_deref()));

    match format {
        InputFormat::Json => {
            let tree = input::parse_json_tree(&text, args.dynamic_properties)?;
            if args.no_parent_index {
                query(NodeRef::new(&tree), &expression, &args)
            } else {
                let index = ParentIndex::build(&tree);
                query(index.root(), &expression, &args)
            }
        }
        InputFormat::Xml => {
            if args.dynamic_properties {
                log::warn!("--dynamic-properties only applies to JSON input");
            }
            let doc = XmlDocument::parse(&text)?;
            query(doc.root_node(), &expression, &args)
        }
    }
}

fn query<'a, N: TreeNode<'a>>(root: N, expression: &PathExpression, args: &Args) -> Result<(), CliError> {
    let functions = if args.no_builtins {
        FunctionRegistry::new()
    } else {
        FunctionRegistry::with_builtins()
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, args.output, root, expression, &functions)?;
    out.flush()?;
    Ok(())
}
