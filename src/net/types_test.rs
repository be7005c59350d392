use super::*;

#[test]
fn multipart_request_overrides_content_type() {
    let req = ApiRequest::post_multipart("/posts", MultipartForm::new().text("description", "x"));
    assert_eq!(req.header("content-type"), Some(MULTIPART_CONTENT_TYPE));
    assert_eq!(req.method, Method::Post);
}

#[test]
fn set_header_replaces_case_insensitively() {
    let mut req = ApiRequest::get("/posts").with_header("authorization", "Bearer old");
    req.set_header(AUTHORIZATION, "Bearer new");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.bearer_token(), Some("new"));
}

#[test]
fn bearer_token_requires_scheme() {
    let req = ApiRequest::get("/").with_header(AUTHORIZATION, "Basic abc");
    assert_eq!(req.bearer_token(), None);
}

#[test]
fn multipart_lookups() {
    let form = MultipartForm::new()
        .text("description", "Overflowing bins")
        .file("image", FilePart::new("bins.jpg", "image/jpeg", vec![1, 2, 3]));
    assert_eq!(form.text_value("description"), Some("Overflowing bins"));
    assert_eq!(form.text_value("image"), None);
    assert_eq!(form.file_value("image").map(|f| f.bytes.len()), Some(3));
    assert_eq!(form.parts().len(), 2);
}

#[test]
fn guess_mime_by_extension() {
    assert_eq!(guess_mime(Path::new("a/b/photo.JPG")), "image/jpeg");
    assert_eq!(guess_mime(Path::new("x.png")), "image/png");
    assert_eq!(guess_mime(Path::new("notes")), "application/octet-stream");
}

#[test]
fn response_success_range() {
    assert!(ApiResponse::new(201, "").is_success());
    assert!(!ApiResponse::new(302, "").is_success());
    assert!(!ApiResponse::new(404, "").is_success());
}

#[tokio::test]
async fn file_part_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("cleanfeed-types-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("litter.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

    let part = FilePart::read(&path).await.unwrap();
    assert_eq!(part.file_name, "litter.png");
    assert_eq!(part.mime, "image/png");
    assert_eq!(part.bytes.len(), 4);
}
