// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_article(sections: usize) -> String {
    let mut content = String::from("<p>Lead paragraph introducing the article.</p>\n");

    for section in 0..sections {
        content.push_str(&format!("<h2>Section {section}</h2>\n"));
        content.push_str("<p>Some paragraph content with <a href=\"/x\">a link</a> and <em>emphasis</em>.</p>\n");
        for sub in 0..3 {
            content.push_str(&format!("<h3>Subsection {section}.{sub}</h3>\n"));
            content.push_str("<ul><li>First point</li><li>Second point</li></ul>\n");
            content.push_str(&format!("<h4>Detail {section}.{sub}</h4>\n"));
            content.push_str("<pre><code>let x = 1 &lt; 2;</code></pre>\n");
        }
    }

    content
}
