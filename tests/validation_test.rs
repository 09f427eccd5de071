//! Tests for client-side validation of drafts and patches.

use portfolio_api::{
    ApiError, BlogPostPatch, NewBlogPost, NewContactMessage, NewHeroText, NewProject, NewSkill,
    ProjectPatch, SkillPatch, Validate,
};

fn field_of(err: ApiError) -> String {
    match err {
        ApiError::Validation { field, .. } => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// Contact messages
// =============================================================================

#[test]
fn valid_contact_message_passes() {
    let message = NewContactMessage::new("Ada", "ada@example.com", "Hello, nice portfolio!")
        .subject("Hi");
    assert!(message.validate().is_ok());
}

#[test]
fn contact_name_length_bounds() {
    let short = NewContactMessage::new("A", "ada@example.com", "Hello, nice portfolio!");
    let long = NewContactMessage::new("x".repeat(101), "ada@example.com", "Hello, nice portfolio!");
    assert_eq!(field_of(short.validate().unwrap_err()), "name");
    assert_eq!(field_of(long.validate().unwrap_err()), "name");
}

#[test]
fn contact_email_must_be_well_formed() {
    for email in ["", "ada", "ada@", "@example.com", "ada@example", "a da@example.com", "a@b@c.com"] {
        let message = NewContactMessage::new("Ada", email, "Hello, nice portfolio!");
        assert_eq!(
            field_of(message.validate().unwrap_err()),
            "email",
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn contact_subject_and_message_bounds() {
    let long_subject =
        NewContactMessage::new("Ada", "ada@example.com", "Hello, nice portfolio!").subject("s".repeat(201));
    let short_message = NewContactMessage::new("Ada", "ada@example.com", "Hi");
    let long_message = NewContactMessage::new("Ada", "ada@example.com", "m".repeat(5_001));

    assert_eq!(field_of(long_subject.validate().unwrap_err()), "subject");
    assert_eq!(field_of(short_message.validate().unwrap_err()), "message");
    assert_eq!(field_of(long_message.validate().unwrap_err()), "message");
}

#[test]
fn lengths_count_characters_not_bytes() {
    let message = NewContactMessage::new("Zoë", "zoe@example.com", "ünïcödé text!");
    assert!(message.validate().is_ok());
}

// =============================================================================
// Other entities
// =============================================================================

#[test]
fn project_requires_title_and_description() {
    assert!(NewProject::new("Site", "A website").validate().is_ok());
    assert_eq!(field_of(NewProject::new(" ", "A website").validate().unwrap_err()), "title");
    assert_eq!(field_of(NewProject::new("Site", "").validate().unwrap_err()), "description");
}

#[test]
fn blog_slug_format() {
    assert!(NewBlogPost::new("T", "hello-world-2", "Body").validate().is_ok());
    for slug in ["Hello", "hello world", "-hello", "hello-", "hello--world", ""] {
        let post = NewBlogPost::new("T", slug, "Body");
        assert_eq!(field_of(post.validate().unwrap_err()), "slug", "{slug:?}");
    }
}

#[test]
fn skill_level_is_capped() {
    assert!(NewSkill::new("Rust", 100).validate().is_ok());
    assert_eq!(field_of(NewSkill::new("Rust", 101).validate().unwrap_err()), "level");
}

#[test]
fn hero_requires_headline() {
    let hero = NewHeroText::default();
    assert_eq!(field_of(hero.validate().unwrap_err()), "headline");
}

// =============================================================================
// Patches
// =============================================================================

#[test]
fn empty_patches_are_valid() {
    assert!(ProjectPatch::default().validate().is_ok());
    assert!(BlogPostPatch::default().validate().is_ok());
    assert!(SkillPatch::default().validate().is_ok());
}

#[test]
fn patch_fields_are_checked_when_set() {
    let blog = BlogPostPatch {
        slug: Some("Bad Slug".into()),
        ..BlogPostPatch::default()
    };
    let skill = SkillPatch {
        level: Some(150),
        ..SkillPatch::default()
    };
    assert_eq!(field_of(blog.validate().unwrap_err()), "slug");
    assert_eq!(field_of(skill.validate().unwrap_err()), "level");
}
