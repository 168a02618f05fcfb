use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{Movie, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every movie in ascending rating order, unrated first and ties by id.
    ///
    /// Rankings are rewritten on the way out so the best-rated movie holds
    /// the highest number. Only rows whose ranking moved are touched.
    pub async fn list_ordered_by_rating(&self) -> AppResult<Vec<Movie>> {
        let mut movies = movie::Entity::find()
            .order_by_asc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        let count = movies.len();
        let mut rewritten = 0usize;

        let txn = self.db.begin().await?;
        for (position, film) in movies.iter_mut().enumerate() {
            let ranking = ranking_for(position);
            if film.ranking == Some(ranking) {
                continue;
            }
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(ranking))
                .filter(movie::Column::Id.eq(film.id))
                .exec(&txn)
                .await?;
            film.ranking = Some(ranking);
            rewritten += 1;
        }
        txn.commit().await?;

        debug!(count = count, rewritten = rewritten, "recomputed rankings");
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Movie> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound(id))
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<Movie> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(new.rating),
            ranking: Set(new.ranking),
            review: Set(new.review),
            image_url: Set(new.image_url),
        };

        match model.insert(&self.db).await {
            Ok(created) => {
                debug!(movie_id = created.id, title = %created.title, "created movie");
                Ok(created)
            },
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::Conflict(title))
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update_rating_review(
        &self,
        id: i32,
        rating: f64,
        review: String,
    ) -> AppResult<Movie> {
        let mut active = movie::ActiveModel::from(self.get(id).await?);
        active.rating = Set(Some(rating));
        active.review = Set(Some(review));
        let updated = active.update(&self.db).await?;
        debug!(movie_id = id, rating = rating, "updated rating and review");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }
        debug!(movie_id = id, "deleted movie");
        Ok(())
    }
}

/// Ranking of the movie at `position` (0-based) in ascending rating order:
/// the lowest rated ranks 1 and the highest rated ranks the movie count.
fn ranking_for(position: usize) -> i32 {
    i32::try_from(position + 1).unwrap_or(i32::MAX)
}
