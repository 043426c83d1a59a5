use crate::{
    EngineError, ResultEngine,
    store::{CollectionStore, ID_FIELD},
    transactions::{Transaction, TransactionInput, TransactionKind},
    validation::validate_transaction,
};

use super::{Engine, required_id};

impl<S: CollectionStore> Engine<S> {
    /// Validate and append an income or expense with the next id of its
    /// collection. Any caller id is ignored.
    pub fn insert_transaction(
        &self,
        kind: TransactionKind,
        input: &TransactionInput,
    ) -> ResultEngine<Transaction> {
        self.validate_transaction_input(kind, input)?;

        let collection = kind.collection();
        let id = self.store.next_id(collection, ID_FIELD);
        let transaction = input.to_transaction(id)?;
        self.append(collection, &transaction)?;
        Ok(transaction)
    }

    /// Fully replace the record with `input.id`, keeping its id.
    pub fn update_transaction(
        &self,
        kind: TransactionKind,
        input: &TransactionInput,
    ) -> ResultEngine<()> {
        let id = required_id(input.id.as_deref())?;
        let not_found = || EngineError::NotFound(kind.not_found_message(id));
        let collection = kind.collection();
        let index = self.locate(collection, id).ok_or_else(not_found)?;
        self.validate_transaction_input(kind, input)?;

        let transaction = input.to_transaction(id.to_string())?;
        self.replace_at(collection, index, &transaction, not_found)
    }

    /// Delete every record with `id` from the kind's collection.
    pub fn delete_transaction(&self, kind: TransactionKind, id: &str) -> ResultEngine<String> {
        if self.remove_by_id(kind.collection(), id)? == 0 {
            return Err(EngineError::NotFound(kind.delete_missing_message()));
        }
        Ok(kind.deleted_message())
    }

    /// Records owned by `user`, in insertion order.
    pub fn transactions_by_user(&self, kind: TransactionKind, user: &str) -> Vec<Transaction> {
        self.load::<Transaction>(kind.collection())
            .into_iter()
            .filter(|transaction| transaction.user == user)
            .collect()
    }

    pub fn transaction_exists(&self, kind: TransactionKind, id: &str) -> bool {
        self.locate(kind.collection(), id).is_some()
    }

    fn validate_transaction_input(
        &self,
        kind: TransactionKind,
        input: &TransactionInput,
    ) -> ResultEngine<()> {
        validate_transaction(
            input,
            kind,
            kind.categories(&self.catalog),
            &self.user_names(),
            self.today(),
        )
    }

    pub fn insert_income(&self, input: &TransactionInput) -> ResultEngine<Transaction> {
        self.insert_transaction(TransactionKind::Income, input)
    }

    pub fn update_income(&self, input: &TransactionInput) -> ResultEngine<()> {
        self.update_transaction(TransactionKind::Income, input)
    }

    pub fn delete_income(&self, id: &str) -> ResultEngine<String> {
        self.delete_transaction(TransactionKind::Income, id)
    }

    pub fn incomes_by_user(&self, user: &str) -> Vec<Transaction> {
        self.transactions_by_user(TransactionKind::Income, user)
    }

    pub fn insert_expense(&self, input: &TransactionInput) -> ResultEngine<Transaction> {
        self.insert_transaction(TransactionKind::Expense, input)
    }

    pub fn update_expense(&self, input: &TransactionInput) -> ResultEngine<()> {
        self.update_transaction(TransactionKind::Expense, input)
    }

    pub fn delete_expense(&self, id: &str) -> ResultEngine<String> {
        self.delete_transaction(TransactionKind::Expense, id)
    }

    pub fn expenses_by_user(&self, user: &str) -> Vec<Transaction> {
        self.transactions_by_user(TransactionKind::Expense, user)
    }
}
