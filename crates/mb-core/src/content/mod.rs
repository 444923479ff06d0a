//! Content collections managed by the admin panel.

pub mod doctor;
pub mod entity;
pub mod facility;
pub mod hero_slide;
pub mod image;
pub mod installment_rule;
pub mod investor;
pub mod news_item;
pub mod status;

pub use doctor::{Doctor, DoctorDraft, DoctorPatch};
pub use entity::{CollectionEntity, EntityDraft, EntityPatch, RankOrdered};
pub use facility::{Facility, FacilityDraft, FacilityPatch};
pub use hero_slide::{HeroSlide, HeroSlideDraft, HeroSlidePatch};
pub use image::{ImageRef, ImageSource, LocalImage, PreviewHandle};
pub use installment_rule::{InstallmentRule, InstallmentRuleDraft, InstallmentRulePatch};
pub use investor::{Investor, InvestorDraft, InvestorPatch};
pub use news_item::{NewsItem, NewsItemDraft, NewsItemPatch};
pub use status::PublishStatus;
