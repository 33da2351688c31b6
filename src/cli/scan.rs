//! `scan` command: one-shot scan of every source.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value as JsonValue;

use super::ScanArgs;
use crate::config::ProjectConfig;
use crate::page::PageNode;
use crate::sync::{LogSink, NodeGraph, Source, Synchronizer};
use crate::utils::plural_count;
use crate::{log, logger};

/// Execute scan command
pub fn run_scan(args: &ScanArgs, config: &ProjectConfig, sources: Vec<Source>) -> Result<()> {
    scan_into(args, config, sources, &mut io::stdout())
}

/// Scan and write the tree, or the JSON with `-o -`, to `out`.
fn scan_into(
    args: &ScanArgs,
    config: &ProjectConfig,
    sources: Vec<Source>,
    out: &mut dyn Write,
) -> Result<()> {
    // `out` carries the JSON alone; progress goes to stderr
    if args.to_stdout() {
        logger::set_stderr(true);
    }

    let mut sync = Synchronizer::new(config.root.clone(), sources);
    let mut sink = LogSink::new();
    let report = sync.scan(&mut sink)?;
    let graph = sync.graph();

    log!("scan"; "{} from {}", plural_count(graph.len(), "page"), plural_count(report.files, "file"));
    if report.duplicates > 0 {
        log!("warn"; "skipped {}", plural_count(report.duplicates, "duplicate"));
    }

    if !args.to_stdout() {
        write_tree(graph, out)?;
    }

    let Some(output) = &args.output else {
        return Ok(());
    };

    let json = nodes_json(graph, args.content)?;
    let formatted = if args.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };

    if args.to_stdout() {
        writeln!(out, "{formatted}")?;
    } else {
        let mut file = fs::File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        writeln!(file, "{formatted}")?;
        log!("scan"; "wrote {} to {}", plural_count(graph.len(), "node"), output.display());
    }
    Ok(())
}

/// All nodes in creation order.
fn nodes_json(graph: &NodeGraph, with_content: bool) -> Result<JsonValue> {
    let nodes = graph
        .iter()
        .map(|node| {
            node.to_json(with_content)
                .with_context(|| format!("failed to read {}", node.absolute_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(JsonValue::Array(nodes))
}

fn write_tree(graph: &NodeGraph, out: &mut dyn Write) -> io::Result<()> {
    for (depth, node) in tree(graph) {
        writeln!(
            out,
            "{}{} {}",
            "  ".repeat(depth),
            node.url,
            format!("({})", node.root_path).dimmed()
        )?;
    }
    Ok(())
}

/// Nodes in display order with their nesting level, siblings sorted by URL.
fn tree(graph: &NodeGraph) -> Vec<(usize, &PageNode)> {
    fn visit<'a>(
        graph: &'a NodeGraph,
        mut nodes: Vec<&'a PageNode>,
        level: usize,
        out: &mut Vec<(usize, &'a PageNode)>,
    ) {
        nodes.sort_by(|a, b| a.url.cmp(&b.url));
        for node in nodes {
            out.push((level, node));
            visit(graph, graph.children_of(&node.id).collect(), level + 1, out);
        }
    }

    let mut out = Vec::with_capacity(graph.len());
    visit(graph, graph.roots().collect(), 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEMPLATES_DIR;
    use crate::utils::path::normalize_path;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn scanned(files: &[&str]) -> (TempDir, Synchronizer) {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        for file in files {
            let path = root.join("pages").join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, format!("# {file}")).unwrap();
        }
        fs::create_dir_all(root.join(TEMPLATES_DIR)).unwrap();
        fs::write(root.join(TEMPLATES_DIR).join("Page.jsx"), "").unwrap();

        let mut config = ProjectConfig::from_str(
            "[[source]]\npath = \"pages\"\ntemplate = \"Page.jsx\"\n",
        )
        .unwrap();
        config.set_root(&root);

        let mut sync = Synchronizer::new(root, config.compile().unwrap());
        sync.scan(&mut LogSink::new()).unwrap();
        (temp, sync)
    }

    #[test]
    fn test_tree_order() {
        let (_temp, sync) = scanned(&[
            "index.md",
            "zeta.md",
            "alpha.md",
            "blog/index.md",
            "blog/second.md",
            "blog/first.md",
        ]);

        let lines: Vec<(usize, &str)> = tree(sync.graph())
            .into_iter()
            .map(|(level, node)| (level, node.url.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![
                (0, "/"),
                (1, "/alpha"),
                (1, "/blog"),
                (2, "/blog/first"),
                (2, "/blog/second"),
                (1, "/zeta"),
            ]
        );
    }

    #[test]
    fn test_nodes_json() {
        let (_temp, sync) = scanned(&["hello.md"]);

        let json = nodes_json(sync.graph(), false).unwrap();
        let node = &json[0];
        assert_eq!(node["url"], "/hello");
        assert_eq!(node["rootPath"], "pages/hello.md");
        assert!(node.get("content").is_none());

        let json = nodes_json(sync.graph(), true).unwrap();
        assert_eq!(json[0]["content"], "# hello.md");
    }

    #[test]
    fn test_stdout_output_is_only_json() {
        let (temp, sync) = scanned(&["index.md", "a.md", "notes.txt"]);
        let args = ScanArgs {
            output: Some(PathBuf::from("-")),
            content: false,
            pretty: false,
        };

        let mut config = ProjectConfig::from_str(
            "[[source]]\npath = \"pages\"\ntemplate = \"Page.jsx\"\n",
        )
        .unwrap();
        config.set_root(&normalize_path(temp.path()));

        let mut out = Vec::new();
        scan_into(&args, &config, sync.sources().to_vec(), &mut out).unwrap();
        assert!(logger::is_stderr());

        let printed: JsonValue = serde_json::from_slice(&out).unwrap();
        let mut urls: Vec<&str> = printed
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|node| node["url"].as_str())
            .collect();
        urls.sort();
        assert_eq!(urls, vec!["/", "/a"]);
    }

    #[test]
    fn test_writes_output_file() {
        let (temp, sync) = scanned(&["a.md", "b.md"]);
        let output = temp.path().join("nodes.json");
        let args = ScanArgs {
            output: Some(output.clone()),
            content: false,
            pretty: true,
        };

        let mut config = ProjectConfig::from_str(
            "[[source]]\npath = \"pages\"\ntemplate = \"Page.jsx\"\n",
        )
        .unwrap();
        config.set_root(&normalize_path(temp.path()));
        run_scan(&args, &config, sync.sources().to_vec()).unwrap();

        let written: JsonValue =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 2);
    }
}
