use std::io::Write;

use evalchain_retrieval::TextLoader;

#[test]
fn text_loader_reads_file_into_single_document() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "Artificial Intelligence began in the 1950s.").expect("write");

    let docs = TextLoader::new(file.path().to_path_buf())
        .load()
        .expect("load");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "Artificial Intelligence began in the 1950s.");
    assert_eq!(
        docs[0].metadata.get("source").and_then(|v| v.as_str()),
        Some(file.path().to_string_lossy().as_ref())
    );
    assert!(docs[0].embedding.is_none());
}

#[test]
fn text_loader_missing_file_is_an_error() {
    let result = TextLoader::new("does-not-exist.txt".into()).load();

    assert!(result.is_err());
}
