//! Artist create/edit form.

use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    FormErrors, check_genres, check_optional, check_phone, check_required, check_url,
    clean_genres, clean_optional, clean_required,
};
use crate::models::{artist, genres_to_json, search_key};

/// Artist details as submitted on create or edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Normalises the submission and validates it.
    pub fn validated(self) -> Result<Self, FormErrors> {
        let form = Self {
            name: clean_required(self.name),
            city: clean_required(self.city),
            state: clean_required(self.state),
            phone: clean_optional(self.phone),
            genres: clean_genres(self.genres),
            image_link: clean_optional(self.image_link),
            facebook_link: clean_optional(self.facebook_link),
            website: clean_optional(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: clean_optional(self.seeking_description),
        };

        let mut errors = FormErrors::new();
        check_required(&mut errors, "name", &form.name, 255);
        check_required(&mut errors, "city", &form.city, 120);
        check_required(&mut errors, "state", &form.state, 120);
        check_phone(&mut errors, "phone", form.phone.as_deref(), 120);
        check_genres(&mut errors, &form.genres);
        check_url(&mut errors, "image_link", form.image_link.as_deref(), 1000);
        check_url(&mut errors, "facebook_link", form.facebook_link.as_deref(), 120);
        check_url(&mut errors, "website", form.website.as_deref(), 200);
        check_optional(
            &mut errors,
            "seeking_description",
            form.seeking_description.as_deref(),
            500,
        );

        errors.into_result(form)
    }

    /// Maps the form onto a new artist row.
    pub fn into_active_model(self) -> artist::ActiveModel {
        let mut model = artist::ActiveModel {
            id: NotSet,
            ..Default::default()
        };
        self.apply_to(&mut model);
        model
    }

    /// Overwrites every editable column of `model` with the form's values.
    pub fn apply_to(self, model: &mut artist::ActiveModel) {
        model.name_search = Set(search_key(&self.name));
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.genres = Set(genres_to_json(&self.genres));
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website = Set(self.website);
        model.seeking_venue = Set(self.seeking_venue);
        model.seeking_description = Set(self.seeking_description);
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(model: &artist::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            phone: model.phone.clone(),
            genres: model.genre_list(),
            image_link: model.image_link.clone(),
            facebook_link: model.facebook_link.clone(),
            website: model.website.clone(),
            seeking_venue: model.seeking_venue,
            seeking_description: model.seeking_description.clone(),
        }
    }
}
