diesel::table! {
    todo (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        completed -> Bool,
        completed_at -> Nullable<Timestamptz>,
    }
}
