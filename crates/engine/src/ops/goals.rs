use crate::{
    EngineError, ResultEngine,
    dates::parse_date,
    goals::{Goal, GoalInput},
    store::{Collection, CollectionStore, ID_FIELD},
    validation::validate_goal,
};

use super::{Engine, required_id};

impl<S: CollectionStore> Engine<S> {
    /// Validate and append a goal. `start_date` is today.
    pub fn insert_goal(&self, input: &GoalInput) -> ResultEngine<Goal> {
        self.validate_goal_input(input)?;

        let id = self.store.next_id(Collection::Goals, ID_FIELD);
        let goal = input.to_goal(id, self.today())?;
        self.append(Collection::Goals, &goal)?;
        Ok(goal)
    }

    /// Fully replace the goal with `input.id`; its `start_date` is kept.
    pub fn update_goal(&self, input: &GoalInput) -> ResultEngine<()> {
        let id = required_id(input.id.as_deref())?;
        let not_found = || EngineError::NotFound(format!("No existe objetivo con id {id}"));
        let index = self.locate(Collection::Goals, id).ok_or_else(not_found)?;
        self.validate_goal_input(input)?;

        let rows = self.store.read_collection(Collection::Goals);
        let start_date = rows
            .get(index)
            .and_then(|row| row.get("start_date"))
            .and_then(|value| value.as_str())
            .and_then(parse_date)
            .unwrap_or_else(|| {
                tracing::debug!("goal {id} had no readable start_date, using today");
                self.today()
            });

        let goal = input.to_goal(id.to_string(), start_date)?;
        self.replace_at(Collection::Goals, index, &goal, not_found)
    }

    pub fn delete_goal(&self, id: &str) -> ResultEngine<String> {
        if self.remove_by_id(Collection::Goals, id)? == 0 {
            return Err(EngineError::NotFound(
                "El objetivo de ahorro que intenta borrar no existe".to_string(),
            ));
        }
        Ok("El objetivo de ahorro fue borrado satisfactoriamente".to_string())
    }

    /// Goals owned by `user`, in insertion order.
    pub fn goals_by_user(&self, user: &str) -> Vec<Goal> {
        self.load::<Goal>(Collection::Goals)
            .into_iter()
            .filter(|goal| goal.user == user)
            .collect()
    }

    pub fn goal_exists(&self, id: &str) -> bool {
        self.locate(Collection::Goals, id).is_some()
    }

    fn validate_goal_input(&self, input: &GoalInput) -> ResultEngine<()> {
        validate_goal(
            input,
            &self.catalog.goal_categories,
            &self.catalog.goal_statuses,
            &self.user_names(),
            self.today(),
        )
    }
}
