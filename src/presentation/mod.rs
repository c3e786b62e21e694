/// プレゼンテーション層モジュール
///
/// コマンド結果を人間向けの行、または `--machine` 用のJSONに変換して書き出します。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
pub mod output;
