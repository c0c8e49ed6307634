// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_minml_content(size: usize) -> String {
    let base = "section[ <h2[Title [amp] more]>\n <p[Paragraph with i[some] b{class=[x y]}[content] and (parens).]>\n <ul[ <li[one]> <li[two]> ]>\n <pre[+[fn example() { println!(\"[hello]\"); }]]>\n <-[ a comment ]> ]\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_minml(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        content.push_str(&format!("div{{id=[d{level}]}}[text {level} "));
    }
    for _ in 0..depth {
        content.push(']');
    }
    content
}
