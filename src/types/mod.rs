//! Entity types exchanged with the portfolio REST API.
//!
//! Each entity comes with a draft type for `create` and a patch type for
//! `update`; both implement [`Validate`] and are checked before any request
//! is sent.

mod blog;
mod contact;
mod hero;
mod project;
mod skill;
mod validation;

pub use blog::{BlogPost, BlogPostPatch, NewBlogPost};
pub use contact::{ContactMessage, ContactMessagePatch, NewContactMessage};
pub use hero::{HeroText, HeroTextPatch, NewHeroText};
pub use project::{NewProject, Project, ProjectPatch};
pub use skill::{MAX_LEVEL, NewSkill, Skill, SkillPatch};
pub use validation::Validate;
