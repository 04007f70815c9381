pub const SCHEMA: &str = "
-- Core prompts table
CREATE TABLE IF NOT EXISTS prompts (
    id INTEGER PRIMARY KEY AUTOINCREMENT, -- Never reused after delete
    title TEXT NOT NULL,                  -- Display title, at most 40 chars
    text TEXT NOT NULL,                   -- The prompt body
    user TEXT NOT NULL,                   -- Opaque owner id
    created_at INTEGER NOT NULL,          -- Unix timestamp (seconds)
    updated_at INTEGER NOT NULL           -- Unix timestamp (seconds)
);

-- One title per owner
CREATE UNIQUE INDEX IF NOT EXISTS idx_prompts_user_title ON prompts(user, title);

-- Listing by owner
CREATE INDEX IF NOT EXISTS idx_prompts_user ON prompts(user, id);
";
