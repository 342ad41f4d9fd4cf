//! Venue create/edit form.

use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    FormErrors, check_genres, check_optional, check_phone, check_required, check_url,
    clean_genres, clean_optional, clean_required,
};
use crate::models::{genres_to_json, search_key, venue};

/// Venue details as submitted on create or edit.
///
/// Missing required fields deserialize as empty strings so they surface as
/// field errors rather than a rejected body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Normalises the submission and validates it.
    pub fn validated(self) -> Result<Self, FormErrors> {
        let form = Self {
            name: clean_required(self.name),
            city: clean_required(self.city),
            state: clean_required(self.state),
            address: clean_optional(self.address),
            phone: clean_optional(self.phone),
            genres: clean_genres(self.genres),
            image_link: clean_optional(self.image_link),
            facebook_link: clean_optional(self.facebook_link),
            website_link: clean_optional(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: clean_optional(self.seeking_description),
        };

        let mut errors = FormErrors::new();
        check_required(&mut errors, "name", &form.name, 255);
        check_required(&mut errors, "city", &form.city, 120);
        check_required(&mut errors, "state", &form.state, 120);
        check_optional(&mut errors, "address", form.address.as_deref(), 120);
        check_phone(&mut errors, "phone", form.phone.as_deref(), 120);
        check_genres(&mut errors, &form.genres);
        check_url(&mut errors, "image_link", form.image_link.as_deref(), 200);
        check_url(&mut errors, "facebook_link", form.facebook_link.as_deref(), 120);
        check_url(&mut errors, "website_link", form.website_link.as_deref(), 100);
        check_optional(
            &mut errors,
            "seeking_description",
            form.seeking_description.as_deref(),
            300,
        );

        errors.into_result(form)
    }

    /// Maps the form onto a new venue row.
    pub fn into_active_model(self) -> venue::ActiveModel {
        let mut model = venue::ActiveModel {
            id: NotSet,
            ..Default::default()
        };
        self.apply_to(&mut model);
        model
    }

    /// Overwrites every editable column of `model` with the form's values.
    pub fn apply_to(self, model: &mut venue::ActiveModel) {
        model.name_search = Set(search_key(&self.name));
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.address = Set(self.address);
        model.phone = Set(self.phone);
        model.genres = Set(genres_to_json(&self.genres));
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website_link = Set(self.website_link);
        model.seeking_talent = Set(self.seeking_talent);
        model.seeking_description = Set(self.seeking_description);
    }
}

impl From<&venue::Model> for VenueForm {
    fn from(model: &venue::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            address: model.address.clone(),
            phone: model.phone.clone(),
            genres: model.genre_list(),
            image_link: model.image_link.clone(),
            facebook_link: model.facebook_link.clone(),
            website_link: model.website_link.clone(),
            seeking_talent: model.seeking_talent,
            seeking_description: model.seeking_description.clone(),
        }
    }
}
