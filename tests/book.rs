use std::{cell::RefCell, fs, rc::Rc};

use foolang::interpreter::evaluator::core::Context;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_foo_blocks(&content).into_iter().enumerate() {
            count += 1;
            let mut context = Context::with_output(Rc::new(RefCell::new(Vec::<String>::new())));
            if let Err(e) = context.run(&code) {
                panic!("Example {} in {:?} failed:\n{}\n{}",
                       i + 1,
                       path,
                       code,
                       e.render(&code));
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_foo_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```foo") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn only_tagged_blocks_are_extracted() {
    let page = "text\n```foo\na = 1;\n```\n```text\nnot code\n```\n";

    assert_eq!(extract_foo_blocks(page), vec!["a = 1;\n"]);
}
